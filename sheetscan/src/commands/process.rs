//! `process`: diff the offers folder against a previous log and process what is new

use super::{DEFAULT_CONFIG, SheetArgs, load_scanner, write_results};
use crate::env::RunEnv;
use crate::formatter;
use anyhow::{Context, Result, bail};
use clap::Args;
use sheetscan_core::{AutoConfirm, Confirm, PromptConfirm, ResultLog, collect_xlsx};
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct ProcessArgs {
    /// Results log of a previous run
    #[arg(short, long, value_name = "LOG")]
    source: Option<PathBuf>,

    /// Field configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG", default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Year folder under OFFERS_BASE_DIR to scan
    #[arg(long)]
    year: Option<String>,

    /// Folder to scan instead of OFFERS_BASE_DIR
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Results file name, written under OUTPUT_DIR
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Process new files without asking
    #[arg(long)]
    yes: bool,

    /// Write the previous log plus the new records instead of the new records alone
    #[arg(long)]
    merge: bool,

    #[command(flatten)]
    sheets: SheetArgs,
}

pub fn run(args: ProcessArgs, env: &RunEnv) -> Result<()> {
    let mut confirm: Box<dyn Confirm> = if args.yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(PromptConfirm::stdio())
    };
    execute(&args, env, &mut *confirm)
}

/// Diff, confirm, process and write; declining leaves the output untouched
fn execute(args: &ProcessArgs, env: &RunEnv, confirm: &mut dyn Confirm) -> Result<()> {
    let scanner = load_scanner(&args.config, &args.sheets)?;

    let prior = match &args.source {
        Some(path) => ResultLog::load(path)
            .with_context(|| format!("Failed to load results log {}", path.display()))?,
        None => ResultLog::default(),
    };

    let dir = env.scan_root(args.root.as_deref(), args.year.as_deref())?;
    let files = collect_xlsx(&dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;
    let new_files = prior.new_files(&files);
    info!(known = prior.len(), found = files.len(), new = new_files.len(), "compared folder with results log");

    if new_files.is_empty() {
        info!("no new files");
        return Ok(());
    }

    formatter::print_new_files(&new_files);
    if !confirm.confirm("Process these files?")? {
        bail!("Declined to process the new files");
    }

    let summary = scanner.run(&new_files, 0)?;
    formatter::print_run_summary(&summary);

    let log = if args.merge {
        let mut merged = prior;
        merged.merge(summary.records);
        merged
    } else {
        ResultLog::new(summary.records)
    };
    write_results(&log, &env.output_path(&args.output))
}
