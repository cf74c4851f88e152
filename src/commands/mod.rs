//! # CLI Command Implementations
//!
//! Each subcommand of `kape2orc` lives in its own file with:
//! - an `Args` struct derived with `clap`,
//! - an `execute` function taking the parsed `Args` (and the global `--color`
//!   flag where the command prints decorated output).
//!
//! The commands that read definitions share [`SourceArgs`].

pub mod completions;
pub mod convert;
pub mod ls;
pub mod tree;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use kape2orc::defaults::{DEFAULT_MASTER, DEFAULT_SOURCE_DIR};
use kape2orc::definition::Definition;
use kape2orc::error::Error;
use kape2orc::phases::discovery;
use kape2orc::resolve::DefinitionSet;
use kape2orc::suggestions;

/// Where the definitions come from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory scanned recursively for .tkape definitions.
    #[arg(long, value_name = "DIR", env = "KAPE2ORC_SOURCE", default_value = DEFAULT_SOURCE_DIR)]
    pub kape: PathBuf,

    /// Master definition driving the conversion.
    #[arg(long, value_name = "FILE", env = "KAPE2ORC_MASTER", default_value = DEFAULT_MASTER)]
    pub master: PathBuf,
}

impl SourceArgs {
    /// Fail early, with hints, when either input is missing.
    pub fn check(&self) -> Result<()> {
        if !self.kape.is_dir() {
            return Err(suggestions::source_dir_missing(&self.kape));
        }
        if !self.master.is_file() {
            return Err(suggestions::master_not_found(&self.master));
        }
        Ok(())
    }

    /// Load the master and scan every other definition.
    pub fn load(&self) -> Result<(Definition, DefinitionSet)> {
        self.check()?;
        let master = discovery::load_master(&self.master).map_err(|e| match e {
            Error::MasterNotFound { path, message } => suggestions::master_unreadable(&path, &message),
            other => other.into(),
        })?;
        let (definitions, _) = discovery::scan_definitions(&self.kape, &self.master);
        Ok((master, definitions))
    }
}
