//! Convert command implementation
//!
//! The convert command runs the full conversion pipeline:
//! 1. Load the master and scan the KAPE source tree
//! 2. Split, flatten and select the definitions the master uses
//! 3. Render GetThis, WolfLauncher and ToolEmbed configurations
//! 4. Write them under the output directory

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;

use kape2orc::defaults::DEFAULT_OUTPUT_DIR;
use kape2orc::error::Error;
use kape2orc::filesystem::FileKind;
use kape2orc::output::{OutputConfig, Tone};
use kape2orc::phases::orchestrator::{self, ConversionReport};
use kape2orc::phases::ConvertOptions;
use kape2orc::schema::EmitSettings;
use kape2orc::suggestions;

use super::SourceArgs;

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output directory for the generated configurations
    #[arg(long, value_name = "DIR", env = "KAPE2ORC_OUTPUT", default_value = DEFAULT_OUTPUT_DIR)]
    pub orc: PathBuf,

    /// Export every scanned definition, not only those the master uses
    #[arg(long)]
    pub keep_unused: bool,

    /// Show what would be written without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl ConvertArgs {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            source: self.source.kape.clone(),
            output: self.orc.clone(),
            master: self.source.master.clone(),
            keep_unused: self.keep_unused,
            dry_run: self.dry_run,
        }
    }
}

/// Execute the convert command
pub fn execute(args: ConvertArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let start_time = Instant::now();

    args.source.check()?;

    if !args.quiet {
        println!("{} kape2orc convert", out.icon("🔍", "[SCAN]"));
        println!("   master: {}", args.source.master.display());
        if args.dry_run {
            println!("{} DRY RUN - nothing will be written", out.icon("🔎", "[DRY]"));
        }
        println!();
    }

    let report = match orchestrator::execute_conversion(&args.options(), &EmitSettings::default()) {
        Ok(report) => report,
        Err(e) => {
            if !args.quiet {
                println!("{} {}", out.icon("❌", "[ERR]"), out.paint("Conversion failed", Tone::Failure));
                println!();
            }
            return Err(match e {
                Error::MasterNotFound { path, message } => {
                    suggestions::master_unreadable(&path, &message)
                }
                Error::Filesystem { message } => suggestions::write_failed(&message),
                other => other.into(),
            });
        }
    };

    if !args.quiet {
        print_report(&out, &args, &report, start_time.elapsed().as_secs_f64());
    }
    Ok(())
}

fn print_report(out: &OutputConfig, args: &ConvertArgs, report: &ConversionReport, seconds: f64) {
    let selectors = report.count(FileKind::Selector);
    let orchestrations = report.count(FileKind::Orchestration);

    let (icon, headline) = if orchestrations > 0 {
        (
            out.icon("✅", "[OK]"),
            out.paint(&format!("Converted in {:.2}s", seconds), Tone::Success),
        )
    } else {
        (
            out.icon("⚠️", "[WARN]"),
            out.paint("Nothing to launch: the master has no exportable targets", Tone::Warning),
        )
    };
    println!("{} {}", icon, headline);
    println!("   strategy: {:?}", report.strategy);
    println!("   {} definition(s) scanned", report.scanned);
    println!("   {} selector configuration(s)", selectors);
    if let Some(manifest) = &report.manifest {
        println!("   manifest: {}", args.orc.join(manifest).display());
    }

    if args.dry_run {
        println!();
        for (path, file) in report.files.files() {
            println!(
                "   {} {}",
                out.paint(&format!("[{}]", file.kind), Tone::Muted),
                args.orc.join(path).display()
            );
        }
    } else if !report.written.is_empty() {
        println!("   files written to: {}", args.orc.display());
    }

    if !report.diagnostics.is_empty() {
        println!();
        println!(
            "{} {} definition(s) or reference(s) skipped (use --verbose for details)",
            out.icon("⚠️", "[WARN]"),
            out.paint(&report.diagnostics.len().to_string(), Tone::Warning)
        );
    }
}
