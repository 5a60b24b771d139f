//! Terminal output for runs, diffs and probes

use anyhow::Result;
use colored::*;
use sheetscan_core::{OutputRecord, ResolvedSheets, RunSummary};
use std::path::{Path, PathBuf};

/// Print one record as pretty JSON
pub fn print_record(record: &OutputRecord) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

/// Print the processed/failed tally of a run, failed files listed individually
pub fn print_run_summary(summary: &RunSummary) {
    println!();
    println!("{}", "Summary:".bold().underline());
    println!(
        "  {} {}",
        "Processed:".green().bold(),
        summary.records.len()
    );

    if !summary.failures.is_empty() {
        println!("  {} {}", "Failed:".red().bold(), summary.failures.len());
        for failure in &summary.failures {
            println!(
                "    {} {}",
                failure.path.display().to_string().yellow(),
                failure.error.to_string().bright_black()
            );
        }
    }

    if summary.limit_reached {
        println!(
            "  {}",
            "Stopped at the maximum number of files".yellow().bold()
        );
    }
}

/// List files that are missing from the previous log
pub fn print_new_files(files: &[PathBuf]) {
    println!("{}", "New files found:".bold());
    for file in files {
        println!("  {}", file.display().to_string().cyan());
    }
}

/// Sheet names of a workbook, with the resolved data/identifier sheets marked
pub fn print_probe(
    file: &Path,
    sheet_names: &[String],
    resolved: &std::result::Result<ResolvedSheets, String>,
) {
    println!("{}", format!("Workbook: {}", file.display()).bold());
    for name in sheet_names {
        let mark = match resolved {
            Ok(sheets) if sheets.data_sheet == *name => " [data]".green().bold(),
            Ok(sheets) if sheets.identifier_sheet == *name => " [identifiers]".green().bold(),
            _ => "".normal(),
        };
        println!("  {}{}", name.cyan(), mark);
    }

    if let Err(reason) = resolved {
        println!("{} {}", "✗".red().bold(), reason);
    } else {
        println!("{}", "✓ Both sheets resolved".green().bold());
    }
}
