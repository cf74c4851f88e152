//! Phase 3: Export
//!
//! This phase renders the resolved definitions into a `MemoryFS`. Nothing is
//! written to disk here.
//!
//! ## Process
//!
//! 1.  **Selectors**: Every exported definition becomes a GetThis
//!     configuration. Definitions with no targets are reported as
//!     `ClassificationMismatch` and skipped. Rendering runs in parallel; the
//!     results keep the export order.
//!
//! 2.  **Orchestration**: The master becomes the WolfLauncher configuration.
//!     Its jobs are restricted to the selectors that were actually rendered.
//!     A master left without jobs is reported and not rendered.
//!
//! 3.  **Manifest**: The ToolEmbed manifest lists the master and every
//!     selector under their deployment paths. It is only produced alongside
//!     the orchestration it embeds.
//!
//! Files are stored relative to the output root, selectors first, then the
//! orchestration, then the manifest.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rayon::prelude::*;

use super::Resolution;
use crate::defaults::MANIFEST_FILENAME;
use crate::definition::Definition;
use crate::error::{Error, Result};
use crate::filesystem::{File, FileKind, MemoryFS};
use crate::path::{deploy_path, relative_output_path};
use crate::schema::embed::{self, Manifest};
use crate::schema::{getthis, wolf, EmitSettings};

/// Output of Phase 3.
#[derive(Debug, Default)]
pub struct Export {
    /// Rendered files keyed by path relative to the output root.
    pub fs: MemoryFS,
    /// Relative path of the manifest, when one was rendered.
    pub manifest: Option<PathBuf>,
    pub diagnostics: Vec<Error>,
}

/// Executes Phase 3 of the pipeline.
pub fn execute(
    resolution: &Resolution,
    scan_root: &Path,
    settings: &EmitSettings,
) -> Result<Export> {
    let mut export = Export::default();

    let (selectors, empty): (Vec<&Definition>, Vec<&Definition>) =
        resolution.exports.iter().partition(|d| !d.is_empty());
    for definition in empty {
        let err = Error::ClassificationMismatch {
            definition: definition.name.clone(),
        };
        info!("{}", err);
        export.diagnostics.push(err);
    }

    let rendered = selectors
        .par_iter()
        .map(|definition| render_selector(definition, scan_root, settings))
        .collect::<Result<Vec<_>>>()?;
    for (path, file) in rendered {
        debug!("Rendered {}", path.display());
        export.fs.add_file(path, file);
    }

    let exported: HashSet<&str> = selectors.iter().map(|d| d.name.as_str()).collect();
    let master = restrict_jobs(&resolution.master, &exported);
    if master.is_empty() {
        let err = Error::ClassificationMismatch {
            definition: master.name.clone(),
        };
        warn!("{}", err);
        export.diagnostics.push(err);
        return Ok(export);
    }

    let content = wolf::render(&master, settings)?;
    export.fs.add_file(
        relative_output_path(&master.path, scan_root),
        File::new(content, FileKind::Orchestration).from_definition(&master.name),
    );

    let mut manifest = Manifest::new(deploy_path(&master.path, scan_root));
    for definition in &selectors {
        manifest.add_selector(deploy_path(&definition.path, scan_root));
    }
    let content = embed::render(&manifest, settings)?;
    let manifest_path = PathBuf::from(MANIFEST_FILENAME);
    export
        .fs
        .add_file(&manifest_path, File::new(content, FileKind::Manifest));
    export.manifest = Some(manifest_path);

    info!(
        "Rendered {} file(s), manifest lists {} configuration(s)",
        export.fs.len(),
        manifest.file_count()
    );
    Ok(export)
}

fn render_selector(
    definition: &Definition,
    scan_root: &Path,
    settings: &EmitSettings,
) -> Result<(PathBuf, File)> {
    let content = getthis::render(definition, settings)?;
    Ok((
        relative_output_path(&definition.path, scan_root),
        File::new(content, FileKind::Selector).from_definition(&definition.name),
    ))
}

/// Copy of `master` keeping only the jobs whose selector was rendered.
fn restrict_jobs(master: &Definition, exported: &HashSet<&str>) -> Definition {
    let mut restricted = master.clone();
    restricted.references.retain(|reference| {
        let keep = reference
            .target
            .definition_name()
            .is_some_and(|name| exported.contains(name));
        if !keep {
            debug!(
                "Dropping job {} from {}",
                reference.target_display(),
                master.name
            );
        }
        keep
    });
    restricted
}
