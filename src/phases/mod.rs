//! Implementation of the phases of a conversion run.
//!
//! ## Overview
//!
//! A conversion follows four phases:
//! 1. Discovery - Load the master definition and scan the source tree
//! 2. Resolution - Classify the master, split mixed definitions, flatten
//!    orchestrator chains and select the definitions to export
//! 3. Export - Render GetThis, WolfLauncher and ToolEmbed documents into a
//!    `MemoryFS`
//! 4. Writing to Disk - Write the rendered files under the output root
//!
//! The `orchestrator` module chains them. Each phase depends only on the
//! previous phases and on the foundation modules (`definition`, `resolve`,
//! `schema`, `path`).
//!
//! Per-definition problems never abort a run: phases log them where they are
//! detected and hand them forward in their `diagnostics` list so the final
//! report can show them.

use std::path::PathBuf;

use serde::Serialize;

use crate::defaults;
use crate::definition::Definition;
use crate::error::Error;
use crate::resolve::DefinitionSet;

// Phase modules
pub mod discovery;
pub mod export;
pub mod orchestrator;
pub mod resolution;
pub mod write;

// Re-export phase modules by pipeline position
pub use discovery as phase1;
pub use export as phase3;
pub use resolution as phase2;
pub use write as phase4;

/// Inputs of a conversion run.
///
/// Roots are explicit so that path computations never consult global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Directory scanned for `.tkape` files.
    pub source: PathBuf,
    /// Directory receiving the generated configurations.
    pub output: PathBuf,
    /// Master definition driving the conversion.
    pub master: PathBuf,
    /// Export every scanned definition, not only those the master uses.
    pub keep_unused: bool,
    /// Render everything but write nothing.
    pub dry_run: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            source: defaults::default_source_dir(),
            output: defaults::default_output_dir(),
            master: defaults::default_master(),
            keep_unused: false,
            dry_run: false,
        }
    }
}

/// Top-level strategy chosen from the master's class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// The master only references other definitions and is used as is.
    Compound,
    /// The master collects files itself and is split first.
    Simple,
}

/// Output of Phase 1.
#[derive(Debug)]
pub struct Discovery {
    pub master: Definition,
    /// Every scanned definition except the master.
    pub definitions: DefinitionSet,
    pub diagnostics: Vec<Error>,
}

/// Output of Phase 2.
#[derive(Debug)]
pub struct Resolution {
    pub strategy: Strategy,
    /// The master in orchestrator form. Not flattened: its references are the
    /// jobs of the WolfLauncher configuration.
    pub master: Definition,
    /// Flattened selector definitions to export, in master reference order
    /// (or scan order when keeping unused definitions).
    pub exports: Vec<Definition>,
    pub diagnostics: Vec<Error>,
}
