//! Phase 1: Discovery
//!
//! This is the first phase of the conversion pipeline. It loads the master
//! definition and parses every other `.tkape` file below the source root.
//!
//! ## Process
//!
//! 1.  **Master (`load_master`)**: The master is required. If it cannot be
//!     read or parsed the run stops with `Error::MasterNotFound`.
//!
//! 2.  **Scan (`scan_definitions`)**: The source tree is walked in file-name
//!     order so results are deterministic across platforms. The master itself
//!     is skipped. Unreadable entries and malformed files are logged, recorded
//!     as diagnostics and skipped.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use super::{ConvertOptions, Discovery};
use crate::definition::{self, is_definition_file, Definition};
use crate::error::{Error, Result};
use crate::resolve::DefinitionSet;

/// Executes Phase 1 of the pipeline.
pub fn execute(options: &ConvertOptions) -> Result<Discovery> {
    let master = load_master(&options.master)?;
    let (definitions, diagnostics) = scan_definitions(&options.source, &options.master);
    info!(
        "Scanned {} definitions under {}",
        definitions.len(),
        options.source.display()
    );
    Ok(Discovery {
        master,
        definitions,
        diagnostics,
    })
}

/// Load the master definition.
pub fn load_master(path: &Path) -> Result<Definition> {
    definition::from_file(path).map_err(|e| Error::MasterNotFound {
        path: path.to_path_buf(),
        message: match e {
            Error::DefinitionParse { message, .. } => message,
            other => other.to_string(),
        },
    })
}

/// Parse every definition below `root`, skipping `exclude`.
///
/// Never fails: problems are returned as diagnostics alongside whatever could
/// be parsed.
pub fn scan_definitions(root: &Path, exclude: &Path) -> (DefinitionSet, Vec<Error>) {
    let excluded = fs::canonicalize(exclude).ok();
    let mut definitions = DefinitionSet::new();
    let mut diagnostics = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let err = Error::from(e);
                info!("{}", err);
                diagnostics.push(err);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !is_definition_file(path) {
            continue;
        }
        if is_same_file(path, exclude, excluded.as_ref()) {
            debug!("Skipping master definition {}", path.display());
            continue;
        }

        match definition::from_file(path) {
            Ok(def) => {
                debug!(
                    "Parsed {} ({} targets, {})",
                    def.name,
                    def.references.len(),
                    def.class()
                );
                definitions.insert(def);
            }
            Err(err) => {
                info!("{}", err);
                diagnostics.push(err);
            }
        }
    }

    (definitions, diagnostics)
}

fn is_same_file(path: &Path, other: &Path, other_canonical: Option<&PathBuf>) -> bool {
    if path == other {
        return true;
    }
    match (fs::canonicalize(path).ok(), other_canonical) {
        (Some(a), Some(b)) => &a == b,
        _ => false,
    }
}
