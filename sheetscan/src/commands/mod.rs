//! Subcommand implementations

pub mod count;
pub mod list;
pub mod probe;
pub mod process;
pub mod read;

#[cfg(test)]
mod fixtures;

use anyhow::{Context, Result};
use clap::Args;
use sheetscan_core::config::{DEFAULT_DATA_SHEET, DEFAULT_IDENTIFIER_HEADER, DEFAULT_IDENTIFIER_SHEETS};
use sheetscan_core::{ExtractionSettings, FieldConfigs, MissingLabelPolicy, ResultLog, Scanner};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Default field configuration file
pub const DEFAULT_CONFIG: &str = "cell_addresses.json";

/// Sheet and column patterns, shared by the extracting subcommands
#[derive(Args, Debug, Clone)]
pub struct SheetArgs {
    /// Pattern of the sheet holding the labeled fields
    #[arg(long, value_name = "PATTERN", default_value = DEFAULT_DATA_SHEET)]
    pub data_sheet: String,

    /// Pattern of the identifier sheet; repeat to add fallbacks, tried in order
    #[arg(long = "id-sheet", value_name = "PATTERN")]
    pub id_sheets: Vec<String>,

    /// Pattern of the identifier column header (first row of the identifier sheet)
    #[arg(long, value_name = "PATTERN", default_value = DEFAULT_IDENTIFIER_HEADER)]
    pub id_header: String,

    /// Fail a file when a field label is not found instead of skipping the field
    #[arg(long)]
    pub strict: bool,
}

impl SheetArgs {
    pub fn settings(&self) -> ExtractionSettings {
        let identifier_sheets = if self.id_sheets.is_empty() {
            DEFAULT_IDENTIFIER_SHEETS.iter().map(|s| s.to_string()).collect()
        } else {
            self.id_sheets.clone()
        };

        ExtractionSettings {
            data_sheet: self.data_sheet.clone(),
            identifier_sheets,
            identifier_header: self.id_header.clone(),
            missing_label: if self.strict {
                MissingLabelPolicy::Fail
            } else {
                MissingLabelPolicy::Skip
            },
        }
    }
}

/// Load the field configuration and build the scanner; any failure ends the run
pub fn load_scanner(config_path: &Path, sheets: &SheetArgs) -> Result<Scanner> {
    let fields = FieldConfigs::from_file(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    info!(fields = fields.len(), config = %config_path.display(), "field configuration loaded");

    Scanner::new(&fields, sheets.settings()).context("Invalid extraction patterns")
}

/// Create the output folder if needed, then write the log
pub fn write_results(log: &ResultLog, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            warn!(output_dir = %dir.display(), "output folder not found, creating it");
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output folder {}", dir.display()))?;
            info!(output_dir = %dir.display(), "output folder created");
        }
    }

    log.save(path)
        .with_context(|| format!("Failed to write results to {}", path.display()))?;
    println!("Results saved to: {}", path.display());
    Ok(())
}
