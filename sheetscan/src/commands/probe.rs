//! `probe`: which sheets of a workbook would be read

use super::SheetArgs;
use crate::formatter;
use anyhow::{Context, Result};
use clap::Args;
use sheetscan_core::{CalamineWorkbook, FieldConfigs, Scanner, SheetSource};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProbeArgs {
    /// Workbook to inspect
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    #[command(flatten)]
    sheets: SheetArgs,
}

pub fn run(args: ProbeArgs) -> Result<()> {
    let workbook = CalamineWorkbook::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let scanner = Scanner::new(&FieldConfigs::default(), args.sheets.settings())
        .context("Invalid sheet patterns")?;

    let resolved = scanner
        .resolve_sheets(workbook.sheet_names())
        .map_err(|e| e.to_string());
    formatter::print_probe(workbook.path(), workbook.sheet_names(), &resolved);
    Ok(())
}
