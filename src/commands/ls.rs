//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists the scanned
//! definitions without converting anything.
//!
//! ## Functionality
//!
//! - **Classification**: Shows whether each definition is a selector, an
//!   orchestrator or mixed, and how many targets it holds
//! - **Usage**: Marks the definitions reachable from the master, which are
//!   the ones a conversion inlines or exports
//! - **Pattern Filtering**: Glob over definition names and relative paths
//! - **JSON Output**: `--json` prints a machine-readable listing
//!
//! This command is a safe, read-only operation.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use console::{pad_str, Alignment};
use serde::Serialize;

use kape2orc::definition::Definition;
use kape2orc::output::{OutputConfig, Tone};
use kape2orc::resolve::{reachable, Class};
use kape2orc::suggestions;

use super::SourceArgs;

/// List scanned definitions
#[derive(Args, Debug)]
pub struct LsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Filter by glob over names and relative paths (e.g. "Windows/*", "*Log*").
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Print the listing as JSON.
    #[arg(long)]
    pub json: bool,
}

/// One listed definition
#[derive(Debug, Serialize)]
pub struct Entry {
    pub name: String,
    /// Path relative to the source directory, with `/` separators.
    pub path: String,
    pub class: Class,
    pub targets: usize,
    /// Reachable from the master.
    pub used: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let (master, definitions) = args.source.load()?;
    let used = reachable(&definitions, &master);

    let mut entries: Vec<Entry> = definitions
        .iter()
        .map(|def| entry(def, &args.source.kape, used.contains(&def.name)))
        .collect();

    if let Some(pattern) = &args.pattern {
        let glob_pattern =
            glob::Pattern::new(pattern).map_err(|e| suggestions::invalid_glob(pattern, &e))?;
        entries.retain(|e| glob_pattern.matches(&e.name) || glob_pattern.matches(&e.path));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No definitions found.");
        return Ok(());
    }

    for e in &entries {
        let marker = if e.used {
            out.paint(out.icon("●", "*"), Tone::Success)
        } else {
            " ".to_string()
        };
        let class = out.class_label(e.class);
        println!(
            "{} {} {:>4} {}",
            marker,
            pad_str(&class, 12, Alignment::Left, None),
            e.targets,
            e.path
        );
    }

    let used_count = entries.iter().filter(|e| e.used).count();
    println!();
    println!(
        "{} definition(s), {} used by {}",
        entries.len(),
        used_count,
        master.name
    );

    Ok(())
}

fn entry(definition: &Definition, scan_root: &Path, used: bool) -> Entry {
    let relative = definition
        .path
        .strip_prefix(scan_root)
        .unwrap_or(&definition.path);
    let path = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    Entry {
        name: definition.name.clone(),
        path,
        class: definition.class(),
        targets: definition.references.len(),
        used,
    }
}
