//! # DFIR-ORC Configuration Schemas
//!
//! This module renders resolved definitions into the three XML documents
//! DFIR-ORC consumes. Each schema lives in its own submodule:
//!
//! - **`getthis`**: file-selector configurations, one per selector definition
//! - **`wolf`**: the WolfLauncher orchestration configuration
//! - **`embed`**: the ToolEmbed deployment manifest
//!
//! Documents are built as `xot` trees through [`XmlBuilder`] and serialized
//! with an XML declaration and indentation. Fixed values that are not derived
//! from the input (resource limits, timeouts, log names, binary names) are
//! gathered in [`EmitSettings`] so the emitters only carry structure.

use xot::{Node, Xot};

use crate::error::{Error, Result};

pub mod embed;
pub mod getthis;
pub mod wolf;

/// Fixed values attached to every emitted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitSettings {
    /// GetThis `<location>`: the root the selectors are evaluated against.
    pub location: String,
    pub max_per_sample_bytes: String,
    pub max_total_bytes: String,
    pub max_sample_count: String,
    /// WolfLauncher `command_timeout`, in seconds.
    pub command_timeout: String,
    pub concurrency: String,
    pub compression: String,
    pub repeat: String,
    pub log_name: String,
    pub outline_name: String,
    /// ToolEmbed launcher binaries.
    pub launcher_x86: String,
    pub launcher_x64: String,
    pub output_pattern: String,
}

impl Default for EmitSettings {
    fn default() -> Self {
        Self {
            location: "%SystemDrive%".to_string(),
            max_per_sample_bytes: "500MB".to_string(),
            max_total_bytes: "10GB".to_string(),
            max_sample_count: "150000".to_string(),
            command_timeout: "3600".to_string(),
            concurrency: "4".to_string(),
            compression: "fast".to_string(),
            repeat: "Once".to_string(),
            log_name: "DFIR-ORC_{SystemType}_{FullComputerName}_{TimeStamp}.log".to_string(),
            outline_name: "DFIR-ORC_{SystemType}_{FullComputerName}_{TimeStamp}.json"
                .to_string(),
            launcher_x86: "DFIR-Orc_x86.exe".to_string(),
            launcher_x64: "DFIR-Orc_x64.exe".to_string(),
            output_pattern: r".\output\%ORC_OUTPUT%".to_string(),
        }
    }
}

/// Thin wrapper over an `xot` arena for building one document.
pub(crate) struct XmlBuilder {
    xot: Xot,
}

impl XmlBuilder {
    pub(crate) fn new() -> Self {
        Self { xot: Xot::new() }
    }

    /// Create a detached element.
    pub(crate) fn element(&mut self, name: &str) -> Node {
        let name = self.xot.add_name(name);
        self.xot.new_element(name)
    }

    /// Create an element and append it to `parent`.
    pub(crate) fn child(&mut self, parent: Node, name: &str) -> Result<Node> {
        let node = self.element(name);
        self.xot.append(parent, node).map_err(xml_error)?;
        Ok(node)
    }

    /// Create an element holding `text` and append it to `parent`.
    pub(crate) fn text_child(&mut self, parent: Node, name: &str, text: &str) -> Result<Node> {
        let node = self.child(parent, name)?;
        self.xot.append_text(node, text).map_err(xml_error)?;
        Ok(node)
    }

    /// Set an attribute. Attributes are serialized in insertion order.
    pub(crate) fn attr(&mut self, node: Node, name: &str, value: &str) {
        let name = self.xot.add_name(name);
        self.xot.attributes_mut(node).insert(name, value.to_string());
    }

    /// Wrap `root` in a document and serialize it.
    pub(crate) fn finish(mut self, root: Node) -> Result<String> {
        let document = self
            .xot
            .new_document_with_element(root)
            .map_err(xml_error)?;
        let parameters = xot::output::xml::Parameters {
            indentation: Some(Default::default()),
            declaration: Some(Default::default()),
            ..Default::default()
        };
        let mut rendered = self
            .xot
            .serialize_xml_string(parameters, document)
            .map_err(xml_error)?;
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(rendered)
    }
}

fn xml_error(e: xot::Error) -> Error {
    Error::Xml {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_renders_nested_document() {
        let mut xml = XmlBuilder::new();
        let root = xml.element("root");
        xml.attr(root, "version", "1");
        let child = xml.text_child(root, "child", "a & b").unwrap();
        xml.attr(child, "name", "x");

        let rendered = xml.finish(root).unwrap();
        assert!(rendered.starts_with("<?xml"));
        assert!(rendered.contains(r#"<root version="1">"#));
        assert!(rendered.contains(r#"<child name="x">a &amp; b</child>"#));
        assert!(rendered.contains("</root>"));
    }

    #[test]
    fn test_default_settings() {
        let settings = EmitSettings::default();
        assert_eq!(settings.location, "%SystemDrive%");
        assert_eq!(settings.command_timeout, "3600");
        assert_eq!(settings.concurrency, "4");
    }
}
