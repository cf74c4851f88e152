//! Orchestrator for the complete conversion
//!
//! This module chains the phases into a single call and collects what each
//! of them reports into a [`ConversionReport`].

use std::path::PathBuf;

use log::info;
use serde::Serialize;

use super::{phase1, phase2, phase3, phase4, ConvertOptions, Strategy};
use crate::error::{Error, Result};
use crate::filesystem::{FileKind, MemoryFS};
use crate::schema::EmitSettings;

/// Outcome of a conversion run.
#[derive(Debug)]
pub struct ConversionReport {
    pub strategy: Strategy,
    /// Number of definitions scanned, master excluded.
    pub scanned: usize,
    /// Rendered files, relative to the output root.
    pub files: MemoryFS,
    /// Relative path of the manifest, when one was rendered.
    pub manifest: Option<PathBuf>,
    /// Full paths written. Empty on a dry run.
    pub written: Vec<PathBuf>,
    /// Everything that was reported and skipped along the way.
    pub diagnostics: Vec<Error>,
}

/// Flat summary of a report, suitable for serialization.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub strategy: Strategy,
    pub scanned: usize,
    pub files: Vec<(PathBuf, FileKind)>,
    pub diagnostics: Vec<String>,
}

impl ConversionReport {
    pub fn count(&self, kind: FileKind) -> usize {
        self.files.list_kind(kind).len()
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            strategy: self.strategy,
            scanned: self.scanned,
            files: self
                .files
                .files()
                .map(|(path, file)| (path.clone(), file.kind))
                .collect(),
            diagnostics: self.diagnostics.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Execute the complete conversion (Phases 1-4)
///
/// 1. Load the master and scan the source tree
/// 2. Split, flatten and select the definitions to export
/// 3. Render every configuration and the manifest
/// 4. Write them under the output root, unless this is a dry run
///
/// Only a missing master and output I/O failures are returned as errors.
pub fn execute_conversion(options: &ConvertOptions, settings: &EmitSettings) -> Result<ConversionReport> {
    // Phase 1: Discovery
    let discovery = phase1::execute(options)?;
    let scanned = discovery.definitions.len();

    // Phase 2: Resolution
    let mut resolution = phase2::execute(discovery, options.keep_unused)?;

    // Phase 3: Export
    let export = phase3::execute(&resolution, &options.source, settings)?;

    // Phase 4: Write to Disk (skipped on dry runs)
    let written = if options.dry_run {
        info!("Dry run: {} file(s) not written", export.fs.len());
        Vec::new()
    } else {
        phase4::execute(&export.fs, &options.output)?
    };

    let mut diagnostics = std::mem::take(&mut resolution.diagnostics);
    diagnostics.extend(export.diagnostics);

    Ok(ConversionReport {
        strategy: resolution.strategy,
        scanned,
        files: export.fs,
        manifest: export.manifest,
        written,
        diagnostics,
    })
}
