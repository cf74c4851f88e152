//! # Error Handling
//!
//! This module defines the centralized error type for `kape2orc`. It uses the
//! `thiserror` library to describe every failure the conversion pipeline can
//! detect, with enough context to produce a readable diagnostic.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Most variants are *diagnostics*: the pipeline
//!   logs them at the point of detection, records them in the conversion
//!   report and carries on with a partial result. Only output I/O failures,
//!   a missing master definition and dependency cycles stop the operation that
//!   raised them.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for kape2orc operations
#[derive(Error, Debug)]
pub enum Error {
    /// A `.tkape` file could not be read or did not deserialize into a
    /// definition. The offending file is skipped.
    #[error("Failed to parse definition {}: {message}", path.display())]
    DefinitionParse { path: PathBuf, message: String },

    /// The master definition file does not exist or cannot be parsed.
    #[error("Master definition not found or unreadable: {} ({message})", path.display())]
    MasterNotFound { path: PathBuf, message: String },

    /// A definition reference names no known definition. The reference is
    /// dropped.
    #[error("Unresolved reference: {reference} (from {definition})")]
    UnresolvedReference {
        reference: String,
        definition: String,
    },

    /// A reference met during flattening resolves to a definition that still
    /// mixes filesystem and definition targets. The reference is dropped.
    #[error("Reference {reference} from {definition} resolves to a mixed definition; split it before flattening")]
    UnexpectedMixedReference {
        reference: String,
        definition: String,
    },

    /// A definition has no references of either kind and cannot be emitted.
    #[error("Definition {definition} has no targets and cannot be exported")]
    ClassificationMismatch { definition: String },

    /// A circular reference chain was found while flattening.
    #[error("Cycle detected in definition references: {cycle}")]
    CycleDetected { cycle: String },

    /// An error occurred while creating directories or writing output files.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An XML document could not be built or serialized.
    #[error("XML generation error: {message}")]
    Xml { message: String },

    /// A directory walk error, wrapped from `walkdir::Error`.
    #[error("Directory scan error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
