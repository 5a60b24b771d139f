//! Error taxonomy for scanning runs

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Debug, Error)]
pub enum ScanError {
    /// Field configuration missing, unreadable or unparsable
    #[error("failed to read field configuration {path}: {reason}")]
    ConfigRead { path: PathBuf, reason: String },

    /// A configured pattern is not a valid regular expression
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("no sheet matches any of the patterns: {}", .patterns.join(", "))]
    SheetNotFound { patterns: Vec<String> },

    #[error("no header cell in the first row matches the pattern: {pattern}")]
    ColumnNotFound { pattern: String },

    /// Only raised when missing labels are configured as failures
    #[error("no cell matches the label pattern '{pattern}' for field '{field}'")]
    LabelNotFound { field: String, pattern: String },

    #[error("invalid cell coordinates (column {col}, row {row})")]
    CellCoordinate { col: i64, row: i64 },

    #[error("failed to open workbook {path}: {reason}")]
    WorkbookOpen { path: PathBuf, reason: String },

    #[error("failed to read sheet '{sheet}': {reason}")]
    SheetRead { sheet: String, reason: String },

    #[error("failed to access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to read results log {path}: {reason}")]
    LogRead { path: PathBuf, reason: String },

    #[error("failed to write results log {path}: {reason}")]
    LogWrite { path: PathBuf, reason: String },

    #[error("failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),
}

impl ScanError {
    /// Errors that abort the current file only; the run continues with the next one.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            ScanError::SheetNotFound { .. }
                | ScanError::ColumnNotFound { .. }
                | ScanError::LabelNotFound { .. }
                | ScanError::CellCoordinate { .. }
                | ScanError::WorkbookOpen { .. }
                | ScanError::SheetRead { .. }
                | ScanError::FileAccess { .. }
        )
    }
}
