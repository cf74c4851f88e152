//! ToolEmbed deployment manifest.
//!
//! The manifest tells DFIR-ORC's packaging step which launcher binaries to
//! embed and where every generated configuration sits at packaging time. The
//! master orchestration is registered under the fixed resource name
//! `WOLFLAUNCHER_CONFIG`; selector configurations are registered under their
//! file names, which is how the WolfLauncher commands address them.

use super::{EmitSettings, XmlBuilder};
use crate::error::Result;

/// Resource name DFIR-ORC looks up for the WolfLauncher configuration.
pub const MASTER_RESOURCE_NAME: &str = "WOLFLAUNCHER_CONFIG";

/// One embedded configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedFile {
    /// Resource name.
    pub name: String,
    /// Path at packaging time, with `\` separators.
    pub path: String,
}

/// Contents of the deployment manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub master: EmbeddedFile,
    pub selectors: Vec<EmbeddedFile>,
}

impl Manifest {
    /// Manifest for a master deployed at `master_path`.
    pub fn new(master_path: String) -> Self {
        Self {
            master: EmbeddedFile {
                name: MASTER_RESOURCE_NAME.to_string(),
                path: master_path,
            },
            selectors: Vec::new(),
        }
    }

    /// Register a selector configuration deployed at `path`. The resource
    /// name is the last path segment.
    pub fn add_selector(&mut self, path: String) {
        let name = path.rsplit('\\').next().unwrap_or(&path).to_string();
        self.selectors.push(EmbeddedFile { name, path });
    }

    /// Number of configuration files listed, master included.
    pub fn file_count(&self) -> usize {
        self.selectors.len() + 1
    }
}

/// Render the manifest.
pub fn render(manifest: &Manifest, settings: &EmitSettings) -> Result<String> {
    let mut xml = XmlBuilder::new();
    let root = xml.element("toolembed");

    xml.text_child(root, "input", &format!(r".\tools\{}", settings.launcher_x86))?;
    xml.text_child(root, "output", &settings.output_pattern)?;
    let run64 = xml.text_child(root, "run64", &format!("7z:#Tools|{}", settings.launcher_x64))?;
    xml.attr(run64, "args", "WolfLauncher");
    let run32 = xml.text_child(root, "run32", "self:#")?;
    xml.attr(run32, "args", "WolfLauncher");

    let archive = xml.child(root, "archive")?;
    xml.attr(archive, "name", "Tools");
    xml.attr(archive, "format", "7z");
    xml.attr(archive, "compression", "Ultra");
    let tool = xml.child(archive, "file")?;
    xml.attr(tool, "name", &settings.launcher_x64);
    xml.attr(tool, "path", &format!(r".\tools\{}", settings.launcher_x64));

    for file in std::iter::once(&manifest.master).chain(&manifest.selectors) {
        let node = xml.child(root, "file")?;
        xml.attr(node, "name", &file.name);
        xml.attr(node, "path", &file.path);
    }

    xml.finish(root)
}
