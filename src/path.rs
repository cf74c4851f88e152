//! Path manipulation utilities for kape2orc
//!
//! Every emitted file has two addresses: where it is written on the build
//! host (under the output root) and where DFIR-ORC finds it once packaged
//! (under the deployment token). Both are derived from the definition's
//! source path relative to the scan root, which callers pass in explicitly.
//! Both addresses come from the same relative segments, so `./kape/X.tkape`
//! under a scan root spelled `kape` lands in the same place either way.

use std::path::{Component, Path, PathBuf};

use crate::defaults::{CONFIG_SUFFIX, DEPLOY_PATH_TOKEN};
use crate::definition::strip_definition_suffix;

/// Replace the `.tkape` suffix of a file name with `_config.xml`.
///
/// The suffix is matched case-insensitively, as in reference targets. Names
/// without the suffix get `_config.xml` appended.
pub fn config_file_name(file_name: &str) -> String {
    let stem = strip_definition_suffix(file_name).unwrap_or(file_name);
    format!("{}{}", stem, CONFIG_SUFFIX)
}

/// Where the configuration generated from `source` is written, relative to
/// the output root.
///
/// `source` is made relative to `scan_root` and intermediate directories are
/// preserved. `.` segments are ignored on both sides, and when the two are
/// still spelled differently their canonical forms are compared. A source
/// outside the scan root maps to its bare file name.
pub fn relative_output_path(source: &Path, scan_root: &Path) -> PathBuf {
    let relative = relative_segments(source, scan_root)
        .unwrap_or_else(|| file_name_segment(source).into_iter().collect());

    let mut out = PathBuf::new();
    if let Some((last, dirs)) = relative.split_last() {
        for dir in dirs {
            out.push(dir);
        }
        out.push(config_file_name(last));
    }
    out
}

/// Where DFIR-ORC finds the configuration generated from `source` once
/// packaged, with `\` separators.
///
/// For a source under `scan_root` this is the deployment token followed by
/// the relative segments, keeping a leading `.` when the scan root had one.
/// Anything else falls back to [`readdress`].
pub fn deploy_path(source: &Path, scan_root: &Path) -> String {
    match relative_segments(source, scan_root) {
        Some(mut relative) => {
            if let Some(last) = relative.last_mut() {
                *last = config_file_name(last);
            }
            let mut segments = Vec::with_capacity(relative.len() + 2);
            if matches!(scan_root.components().next(), Some(Component::CurDir)) {
                segments.push(".".to_string());
            }
            segments.push(DEPLOY_PATH_TOKEN.to_string());
            segments.extend(relative);
            segments.join("\\")
        }
        None => readdress(&source.to_string_lossy()),
    }
}

/// Re-address a raw source path into the deployment convention.
///
/// The first segment (or the second, when the first is `.`) is replaced by
/// the deployment token and the last segment gets its suffix substituted.
/// Both `/` and `\` are accepted as separators; the result uses `\`.
pub fn readdress(source: &str) -> String {
    let mut segments: Vec<String> = source.split(['/', '\\']).map(str::to_string).collect();

    let token_at = if segments.len() > 1 && segments[0] == "." {
        1
    } else {
        0
    };
    if let Some(last) = segments.last_mut() {
        *last = config_file_name(last);
    }
    // A bare file name keeps its name and gains the token in front of it.
    if token_at + 1 >= segments.len() {
        segments.insert(token_at, DEPLOY_PATH_TOKEN.to_string());
    } else {
        segments[token_at] = DEPLOY_PATH_TOKEN.to_string();
    }
    segments.join("\\")
}

fn relative_segments(source: &Path, scan_root: &Path) -> Option<Vec<String>> {
    let relative = strip_scan_root(source, scan_root)?;
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    (!segments.is_empty()).then_some(segments)
}

fn strip_scan_root(source: &Path, scan_root: &Path) -> Option<PathBuf> {
    if let Ok(relative) = lexical(source).strip_prefix(lexical(scan_root)) {
        if !relative.components().any(|c| matches!(c, Component::ParentDir)) {
            return Some(relative.to_path_buf());
        }
    }
    let source = source.canonicalize().ok()?;
    let scan_root = scan_root.canonicalize().ok()?;
    source
        .strip_prefix(scan_root)
        .ok()
        .map(Path::to_path_buf)
}

/// `path` without its `.` components.
fn lexical(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn file_name_segment(source: &Path) -> Option<String> {
    source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
