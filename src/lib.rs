//! # kape2orc Library
//!
//! This library converts KAPE target definitions (`.tkape` files) into the
//! configuration files DFIR-ORC consumes. It is designed to be used by the
//! `kape2orc` command-line tool but can be driven directly as well.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use kape2orc::definition;
//! use kape2orc::resolve::{classify, Class};
//!
//! let yaml = r#"
//! Description: Event logs
//! Targets:
//!     - Name: Event logs Win7+
//!       Category: EventLogs
//!       Path: C:\Windows\System32\winevt\logs\
//!       FileMask: '*.evtx'
//! "#;
//! let def = definition::parse(yaml, Path::new("kape/Windows/EventLogs.tkape")).unwrap();
//!
//! assert_eq!(def.name, "EventLogs");
//! assert_eq!(classify(&def), Class::Selector);
//! ```
//!
//! ## Core Concepts
//!
//! - **Definitions (`definition`)**: The parsed `.tkape` model. Each reference
//!   targets either files on disk or another definition.
//! - **Resolution (`resolve`)**: Classification, splitting of mixed
//!   definitions and flattening of orchestrator chains.
//! - **Schemas (`schema`)**: Rendering to GetThis, WolfLauncher and ToolEmbed
//!   XML.
//! - **Paths (`path`)**: Output locations on the build host and deployment
//!   locations inside the DFIR-ORC package.
//! - **In-Memory Filesystem (`filesystem`)**: Rendered files are staged before
//!   anything is written, which is what makes dry runs possible.
//! - **Phases (`phases`)**: The conversion pipeline.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::orchestrator::execute_conversion`:
//!
//! 1.  **Discovery**: Load the master definition and scan the source tree.
//! 2.  **Resolution**: Split the master if needed, split every mixed
//!     definition, flatten orchestrators and select what the master uses.
//! 3.  **Export**: Render selectors, the orchestration and the manifest.
//! 4.  **Disk Output**: Write the rendered files under the output directory.

pub mod defaults;
pub mod definition;
pub mod error;
pub mod filesystem;
pub mod output;
pub mod path;
pub mod phases;
pub mod resolve;
pub mod schema;
pub mod suggestions;

#[cfg(test)]
mod path_proptest;
