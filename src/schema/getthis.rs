//! GetThis file-selector configuration.
//!
//! One `<sample>` per reference, each holding a single `<ntfs_find>`. The
//! find criterion is built from the KAPE `Path` and `FileMask`:
//!
//! | Path | FileMask | Emitted                              |
//! |------|----------|--------------------------------------|
//! | yes  | yes      | `path_match="<path><mask>"`          |
//! | no   | yes      | `name="<mask>"`                      |
//! | yes  | no       | `path_match="<path>*"`               |
//! | no   | no       | `path_match="*"`                     |
//!
//! Paths lose their drive letter (`C:\` becomes `\`, relative to the
//! `<location>`), and `%user%` expands to `*`.

use std::sync::LazyLock;

use regex::Regex;

use super::{EmitSettings, XmlBuilder};
use crate::definition::{Definition, Target};
use crate::error::Result;

static DRIVE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]:\\").expect("drive prefix pattern is valid"));

static USER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)%user%").expect("user token pattern is valid"));

/// How a sample locates its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindCriterion {
    /// Full path pattern, relative to the location root.
    PathMatch(String),
    /// File name only, anywhere on the volume.
    Name(String),
}

/// Build the `ntfs_find` criterion for a filesystem target.
pub fn find_criterion(path: Option<&str>, file_mask: Option<&str>) -> FindCriterion {
    let path = path.map(normalize_path);
    match (path, file_mask) {
        (Some(path), Some(mask)) => FindCriterion::PathMatch(format!("{}{}", path, mask)),
        (None, Some(mask)) => FindCriterion::Name(mask.to_string()),
        (Some(path), None) => FindCriterion::PathMatch(format!("{}*", path)),
        (None, None) => FindCriterion::PathMatch("*".to_string()),
    }
}

/// Strip a leading drive letter and expand `%user%`.
pub fn normalize_path(path: &str) -> String {
    let path = DRIVE_PREFIX.replace(path, r"\");
    USER_TOKEN.replace_all(&path, "*").into_owned()
}

/// Sample names may not contain spaces.
pub fn sample_name(reference_name: &str) -> String {
    reference_name.replace(' ', "_")
}

/// Render a selector definition. Definition references, which a flattened
/// selector does not have, are skipped.
pub fn render(definition: &Definition, settings: &EmitSettings) -> Result<String> {
    let mut xml = XmlBuilder::new();
    let root = xml.element("getthis");
    xml.child(root, "output")?;
    xml.text_child(root, "location", &settings.location)?;

    let samples = xml.child(root, "samples")?;
    xml.attr(samples, "MaxPerSampleBytes", &settings.max_per_sample_bytes);
    xml.attr(samples, "MaxTotalBytes", &settings.max_total_bytes);
    xml.attr(samples, "MaxSampleCount", &settings.max_sample_count);

    for reference in &definition.references {
        let Target::Filesystem { path, file_mask } = &reference.target else {
            continue;
        };

        let sample = xml.child(samples, "sample")?;
        xml.attr(sample, "name", &sample_name(&reference.name));
        let find = xml.child(sample, "ntfs_find")?;
        match find_criterion(path.as_deref(), file_mask.as_deref()) {
            FindCriterion::PathMatch(pattern) => xml.attr(find, "path_match", &pattern),
            FindCriterion::Name(name) => xml.attr(find, "name", &name),
        }
    }

    xml.finish(root)
}
