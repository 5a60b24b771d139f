//! `count`: files under the offers folder per extension

use crate::env::RunEnv;
use anyhow::{Context, Result};
use clap::Args;
use sheetscan_core::count_files;
use std::path::PathBuf;

#[derive(Args)]
pub struct CountArgs {
    /// Folder to scan (defaults to OFFERS_BASE_DIR)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
}

pub fn run(args: CountArgs, env: &RunEnv) -> Result<()> {
    let root = env.scan_root(args.root.as_deref(), None)?;
    let counts =
        count_files(&root).with_context(|| format!("Failed to scan {}", root.display()))?;

    for line in counts.report_lines() {
        println!("{}", line);
    }
    Ok(())
}
