//! Phase 4: Writing to Disk
//!
//! This is the final phase of the conversion pipeline. It writes the rendered
//! `MemoryFS` under the output root.
//!
//! ## Process
//!
//! 1.  **Iterate Files**: Files are written in `MemoryFS` order, so selector
//!     configurations land before the orchestration that invokes them and the
//!     manifest comes last.
//!
//! 2.  **Create Directories**: Parent directories are created recursively,
//!     mirroring the layout of the source tree.
//!
//! 3.  **Write Content**: Existing files are overwritten.
//!
//! The first failure stops the phase. A manifest is never written for an
//! orchestration whose selectors could not all be written.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::filesystem::MemoryFS;

/// Execute Phase 4: write the rendered files under `output_root`.
///
/// Returns the full paths written, in order.
pub fn execute(rendered: &MemoryFS, output_root: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(rendered.len());

    for (relative_path, file) in rendered.files() {
        let full_path = output_root.join(relative_path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
                message: format!("Failed to create directory '{}': {}", parent.display(), e),
            })?;
        }

        fs::write(&full_path, &file.content).map_err(|e| Error::Filesystem {
            message: format!("Failed to write file '{}': {}", full_path.display(), e),
        })?;

        debug!("Wrote {} ({} bytes)", full_path.display(), file.size());
        written.push(full_path);
    }

    Ok(written)
}
