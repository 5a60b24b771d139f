//! `count-and-list`: CSV report of every .xlsx file under the offers folder

use crate::env::RunEnv;
use anyhow::{Context, Result};
use clap::Args;
use sheetscan_core::collect_xlsx;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args)]
pub struct ListArgs {
    /// Folder to scan (defaults to OFFERS_BASE_DIR)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Report file, one path per line
    #[arg(long, value_name = "FILE", default_value = "files.csv")]
    report: PathBuf,
}

pub fn run(args: ListArgs, env: &RunEnv) -> Result<()> {
    let root = env.scan_root(args.root.as_deref(), None)?;
    let files =
        collect_xlsx(&root).with_context(|| format!("Failed to scan {}", root.display()))?;

    write_report(&files, &args.report)?;
    info!(files = files.len(), report = %args.report.display(), "file list written");
    println!("{} xlsx files listed in {}", files.len(), args.report.display());
    Ok(())
}

/// One record per path, so paths containing commas or quotes stay intact
fn write_report(files: &[PathBuf], report: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(report)
        .with_context(|| format!("Failed to create report {}", report.display()))?;
    for file in files {
        writer.write_record([file.display().to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
