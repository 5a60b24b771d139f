//! `read`: extract one workbook or every workbook of a year folder

use super::{DEFAULT_CONFIG, SheetArgs, load_scanner, write_results};
use crate::env::RunEnv;
use crate::formatter;
use anyhow::{Context, Result, bail};
use clap::Args;
use sheetscan_core::{ResultLog, collect_xlsx};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Args)]
pub struct ReadArgs {
    /// Field configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG", default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Single workbook to process
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Year folder under OFFERS_BASE_DIR to process
    #[arg(short, long)]
    year: Option<String>,

    /// Folder to scan instead of OFFERS_BASE_DIR
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Stop after this many successfully processed files
    #[arg(short, long)]
    max: Option<usize>,

    /// Results file name, written under OUTPUT_DIR
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print every extracted record and log at debug level
    #[arg(long)]
    pub debug: bool,

    #[command(flatten)]
    sheets: SheetArgs,
}

pub fn run(args: ReadArgs, env: &RunEnv) -> Result<()> {
    let start = Instant::now();

    let log = collect_records(&args, env)?;
    if let Some(output) = &args.output {
        write_results(&log, &env.output_path(output))?;
    }

    println!(
        "Completed in {:.3} seconds",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Records for `--file` and the scanned folder, one per path
fn collect_records(args: &ReadArgs, env: &RunEnv) -> Result<ResultLog> {
    if args.file.is_none() && args.year.is_none() && args.root.is_none() {
        bail!("At least one of --file, --year or --root is required");
    }

    let scanner = load_scanner(&args.config, &args.sheets)?;
    let mut log = ResultLog::default();

    // A single requested file must succeed
    if let Some(file) = &args.file {
        let record = scanner
            .process_file(file)
            .with_context(|| format!("Error processing file {}", file.display()))?;
        if args.debug {
            formatter::print_record(&record)?;
        }
        log.merge(vec![record]);
    }

    if args.year.is_some() || args.root.is_some() {
        let dir = env.scan_root(args.root.as_deref(), args.year.as_deref())?;
        let files: Vec<PathBuf> = collect_xlsx(&dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?
            .into_iter()
            .filter(|path| !log.contains(path))
            .collect();

        println!("Found {} Excel files in {}", files.len(), dir.display());
        if let Some(max) = args.max.filter(|m| *m > 0) {
            println!("Only {} files will be processed", max);
        }

        let summary = scanner.run(&files, args.max.unwrap_or(0))?;
        if args.debug {
            for record in &summary.records {
                formatter::print_record(record)?;
            }
        }
        formatter::print_run_summary(&summary);
        log.merge(summary.records);
    }

    Ok(log)
}
