//! # Definition Model and Parsing
//!
//! This module defines the in-memory representation of a KAPE target
//! definition (`.tkape` file) and the logic for parsing one from YAML.
//!
//! ## Key Components
//!
//! - **`Definition`**: A named collection unit. Its name is derived from the
//!   file name, never from the YAML body.
//!
//! - **`Reference`**: One entry of the definition's `Targets` list. Order is
//!   significant because it drives emission order.
//!
//! - **`Target`**: What a reference points at. Whether a `Path` names another
//!   definition or a location on disk is decided once, here, at parse time.
//!   Everything downstream matches on the enum instead of sniffing strings.
//!
//! ## Parsing
//!
//! KAPE files are loosely typed: `Version: 1.0` arrives as a float and
//! `FileMask` is sometimes an empty string. Metadata fields accept any YAML
//! scalar and are kept as strings; empty `Path`/`FileMask` values are treated
//! as absent. Keys this tool has no use for (`Id`, `Comment`,
//! `RecreateDirectories`, ...) are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use crate::defaults::DEFINITION_SUFFIX;
use crate::error::{Error, Result};
use crate::resolve::{classify, Class};

/// The thing a reference points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Files to collect directly.
    Filesystem {
        /// Directory (or file) path, possibly with a drive letter and `%user%`.
        path: Option<String>,
        /// Glob restricting which files under `path` are collected.
        file_mask: Option<String>,
    },
    /// Another definition, by name (file name without `.tkape`).
    Definition { name: String },
}

impl Target {
    /// Build a target from the raw `Path`/`FileMask` pair of a KAPE entry.
    pub fn from_raw(path: Option<String>, file_mask: Option<String>) -> Self {
        match path.as_deref().and_then(strip_definition_suffix) {
            Some(name) => Target::Definition {
                name: name.to_string(),
            },
            None => Target::Filesystem { path, file_mask },
        }
    }

    /// Name of the referenced definition, if this is a definition target.
    pub fn definition_name(&self) -> Option<&str> {
        match self {
            Target::Definition { name } => Some(name),
            Target::Filesystem { .. } => None,
        }
    }

    pub fn is_definition(&self) -> bool {
        matches!(self, Target::Definition { .. })
    }
}

/// One entry inside a definition's reference list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Human-readable label.
    pub name: String,
    /// Classification tag, passed through untouched.
    pub category: String,
    pub target: Target,
    /// Whether collection should descend subdirectories. Carried but not
    /// emitted: GetThis `path_match` patterns already express depth.
    pub recursive: bool,
}

impl Reference {
    /// A reference collecting files from disk.
    pub fn filesystem(name: &str, path: Option<&str>, file_mask: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            category: String::new(),
            target: Target::Filesystem {
                path: path.map(str::to_string),
                file_mask: file_mask.map(str::to_string),
            },
            recursive: false,
        }
    }

    /// A reference to another definition by name.
    pub fn definition(name: &str, target_name: &str) -> Self {
        Self {
            name: name.to_string(),
            category: String::new(),
            target: Target::Definition {
                name: target_name.to_string(),
            },
            recursive: false,
        }
    }

    /// The `Path` value as it would appear in a `.tkape` file.
    pub fn target_display(&self) -> String {
        match &self.target {
            Target::Definition { name } => format!("{}{}", name, DEFINITION_SUFFIX),
            Target::Filesystem { path, file_mask } => format!(
                "{}{}",
                path.as_deref().unwrap_or_default(),
                file_mask.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// A parsed KAPE target definition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Definition {
    /// File name without the `.tkape` suffix. Used for reference lookup.
    pub name: String,
    /// Location of the source file; drives output and deployment paths.
    pub path: PathBuf,
    pub description: String,
    pub author: String,
    pub version: String,
    pub references: Vec<Reference>,
}

impl Definition {
    pub fn new(name: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Append a reference, builder style.
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }

    /// Copy of this definition's metadata with a new identity and no references.
    pub fn derive(&self, name: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            description: self.description.clone(),
            author: self.author.clone(),
            version: self.version.clone(),
            references: Vec::new(),
        }
    }

    pub fn class(&self) -> Class {
        classify(self)
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// File name other definitions use to reference this one.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, DEFINITION_SUFFIX)
    }

    /// Names of the definitions this one references, in order.
    pub fn referenced_names(&self) -> impl Iterator<Item = &str> {
        self.references
            .iter()
            .filter_map(|r| r.target.definition_name())
    }
}

/// Raw shape of a `.tkape` file.
#[derive(Debug, Deserialize)]
struct RawDefinition {
    #[serde(rename = "Description", default, deserialize_with = "scalar_string")]
    description: String,
    #[serde(rename = "Author", default, deserialize_with = "scalar_string")]
    author: String,
    #[serde(rename = "Version", default, deserialize_with = "scalar_string")]
    version: String,
    #[serde(rename = "Targets", default)]
    targets: Vec<RawTarget>,
}

#[derive(Debug, Deserialize)]
struct RawTarget {
    #[serde(rename = "Name", default, deserialize_with = "scalar_string")]
    name: String,
    #[serde(rename = "Category", default, deserialize_with = "scalar_string")]
    category: String,
    #[serde(rename = "Path", default, deserialize_with = "optional_scalar")]
    path: Option<String>,
    #[serde(rename = "FileMask", default, deserialize_with = "optional_scalar")]
    file_mask: Option<String>,
    #[serde(rename = "Recursive", default)]
    recursive: bool,
}

impl From<RawTarget> for Reference {
    fn from(raw: RawTarget) -> Self {
        Self {
            name: raw.name,
            category: raw.category,
            target: Target::from_raw(raw.path, raw.file_mask),
            recursive: raw.recursive,
        }
    }
}

fn optional_scalar<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(serde::de::Error::custom(format!(
                "expected a scalar value, found {:?}",
                other
            )))
        }
    };
    if text.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_scalar(deserializer)?.unwrap_or_default())
}

/// Strip the `.tkape` suffix (ASCII case-insensitively) from a reference path.
pub(crate) fn strip_definition_suffix(path: &str) -> Option<&str> {
    let path = path.trim();
    let split = path.len().checked_sub(DEFINITION_SUFFIX.len())?;
    if !path.is_char_boundary(split) {
        return None;
    }
    let (stem, suffix) = path.split_at(split);
    (suffix.eq_ignore_ascii_case(DEFINITION_SUFFIX) && !stem.is_empty()).then_some(stem)
}

/// Derive a definition name from its file path.
pub fn name_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match strip_definition_suffix(&file_name) {
        Some(stem) => stem.to_string(),
        None => file_name,
    }
}

/// Whether a directory entry looks like a definition file.
pub fn is_definition_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(strip_definition_suffix)
        .is_some()
}

/// Parse YAML content into a definition located at `path`.
pub fn parse(content: &str, path: &Path) -> Result<Definition> {
    let raw: RawDefinition =
        serde_yaml::from_str(content).map_err(|e| Error::DefinitionParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(Definition {
        name: name_from_path(path),
        path: path.to_path_buf(),
        description: raw.description,
        author: raw.author,
        version: raw.version,
        references: raw.targets.into_iter().map(Reference::from).collect(),
    })
}

/// Read and parse a `.tkape` file.
pub fn from_file(path: &Path) -> Result<Definition> {
    let content = fs::read_to_string(path).map_err(|e| Error::DefinitionParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse(&content, path)
}
