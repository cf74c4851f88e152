//! # kape2orc CLI
//!
//! This is the binary entry point for the `kape2orc` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and terminal output.
//! - Executing the appropriate command based on the parsed arguments.
//!
//! The conversion logic lives in the `lib.rs` library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
