//! In-memory staging area for generated configuration files
//!
//! Rendering fills a [`MemoryFS`]; nothing touches the disk until the write
//! phase walks it. Files keep their insertion order so that selector
//! configurations are written before the orchestration that invokes them and
//! the manifest comes last.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// What a generated file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// GetThis file-selector configuration
    Selector,
    /// WolfLauncher orchestration configuration
    Orchestration,
    /// ToolEmbed deployment manifest
    Manifest,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileKind::Selector => "getthis",
            FileKind::Orchestration => "wolf",
            FileKind::Manifest => "embed",
        };
        f.write_str(label)
    }
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub content: String,
    pub kind: FileKind,
    /// Name of the definition this file was rendered from.
    pub source: Option<String>,
}

impl File {
    pub fn new(content: String, kind: FileKind) -> Self {
        Self {
            content,
            kind,
            source: None,
        }
    }

    /// Record the definition the file was rendered from.
    pub fn from_definition(mut self, name: &str) -> Self {
        self.source = Some(name.to_string());
        self
    }

    /// Get file size in bytes
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Ordered set of generated files keyed by output path.
#[derive(Debug, Clone, Default)]
pub struct MemoryFS {
    files: Vec<(PathBuf, File)>,
}

impl MemoryFS {
    /// Create a new empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any earlier file at the same path in place.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, file: File) {
        let path = path.as_ref();
        match self.files.iter_mut().find(|(p, _)| p == path) {
            Some((_, existing)) => *existing = file,
            None => self.files.push((path.to_path_buf(), file)),
        }
    }

    /// Get a file by path
    pub fn get_file<P: AsRef<Path>>(&self, path: P) -> Option<&File> {
        let path = path.as_ref();
        self.files.iter().find(|(p, _)| p == path).map(|(_, f)| f)
    }

    /// Check if a file exists
    pub fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        self.get_file(path).is_some()
    }

    /// List all files in insertion order
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.files.iter().map(|(p, _)| p.clone()).collect()
    }

    /// Paths of all files of one kind
    pub fn list_kind(&self, kind: FileKind) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|(_, f)| f.kind == kind)
            .map(|(p, _)| p.clone())
            .collect()
    }

    /// Get the number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if filesystem is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over all files as (path, file) pairs
    pub fn files(&self) -> impl Iterator<Item = (&PathBuf, &File)> {
        self.files.iter().map(|(p, f)| (p, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let mut fs = MemoryFS::new();
        fs.add_file("b.xml", File::new("b".into(), FileKind::Selector));
        fs.add_file("a.xml", File::new("a".into(), FileKind::Orchestration));
        fs.add_file("embed.xml", File::new("m".into(), FileKind::Manifest));

        assert_eq!(
            fs.list_files(),
            vec![
                PathBuf::from("b.xml"),
                PathBuf::from("a.xml"),
                PathBuf::from("embed.xml")
            ]
        );
        assert_eq!(fs.list_kind(FileKind::Selector), vec![PathBuf::from("b.xml")]);
    }

    #[test]
    fn test_add_replaces_in_place() {
        let mut fs = MemoryFS::new();
        fs.add_file("a.xml", File::new("old".into(), FileKind::Selector));
        fs.add_file("b.xml", File::new("b".into(), FileKind::Selector));
        fs.add_file(
            "a.xml",
            File::new("new".into(), FileKind::Selector).from_definition("A"),
        );

        assert_eq!(fs.len(), 2);
        assert_eq!(fs.list_files()[0], PathBuf::from("a.xml"));
        let file = fs.get_file("a.xml").unwrap();
        assert_eq!(file.content, "new");
        assert_eq!(file.source.as_deref(), Some("A"));
        assert_eq!(file.size(), 3);
    }

    #[test]
    fn test_exists_and_empty() {
        let mut fs = MemoryFS::new();
        assert!(fs.is_empty());
        fs.add_file("x.xml", File::new(String::new(), FileKind::Manifest));
        assert!(fs.exists("x.xml"));
        assert!(!fs.exists("y.xml"));
    }
}
