//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::commands;

/// kape2orc - Convert KAPE target definitions into DFIR-ORC configurations
#[derive(Parser, Debug)]
#[command(name = "kape2orc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: LevelFilter,

    /// Report every skipped definition and reference (raises the log level to info)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert the definitions reachable from the master into DFIR-ORC configurations
    Convert(commands::convert::ConvertArgs),

    /// List scanned definitions with their class and usage
    Ls(commands::ls::LsArgs),

    /// Display the inclusion tree of the master definition
    Tree(commands::tree::TreeArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        self.init_logging();

        match self.command {
            Commands::Convert(args) => commands::convert::execute(args, &self.color),
            Commands::Ls(args) => commands::ls::execute(args, &self.color),
            Commands::Tree(args) => commands::tree::execute(args, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }

    fn effective_level(&self) -> LevelFilter {
        if self.verbose {
            self.log_level.max(LevelFilter::Info)
        } else {
            self.log_level
        }
    }

    fn init_logging(&self) {
        let _ = env_logger::Builder::new()
            .filter_level(self.effective_level())
            .format_timestamp(None)
            .format_target(false)
            .parse_default_env()
            .try_init();
    }
}
