//! sheetscan-core: field and identifier extraction for spreadsheet folders
//!
//! Walks a directory tree for workbooks, reads labeled values from a data sheet
//! and distinct identifiers from a secondary sheet, and keeps the results in a
//! JSON log that later runs diff against.

pub mod config;
pub mod error;
pub mod extract;
pub mod prompt;
pub mod reader;
pub mod record;
pub mod results;
pub mod walker;

use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub use config::{ExtractionSettings, FieldConfig, FieldConfigs, FieldRule, MissingLabelPolicy};
pub use error::{Result, ScanError};
pub use prompt::{AutoConfirm, Confirm, PromptConfirm};
pub use reader::{CalamineWorkbook, CellRef, MemoryWorkbook, SheetGrid, SheetSource};
pub use record::{FileTimes, OutputRecord};
pub use results::ResultLog;
pub use walker::{ExtensionCounts, collect_xlsx, count_files};

use config::SheetPatterns;
use extract::{locate_sheet, locate_sheet_chain};
use record::{RecordInput, build_record};

/// A file the run loop gave up on
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: ScanError,
}

/// Outcome of processing a list of files
#[derive(Debug, Default)]
pub struct RunSummary {
    pub records: Vec<OutputRecord>,
    pub failures: Vec<FileFailure>,
    /// Set when the run stopped at the file limit
    pub limit_reached: bool,
}

/// Sheets a workbook resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSheets {
    pub data_sheet: String,
    pub identifier_sheet: String,
}

/// Main extraction interface
pub struct Scanner {
    fields: Vec<FieldRule>,
    patterns: SheetPatterns,
    settings: ExtractionSettings,
}

impl Scanner {
    /// Compile the field configuration and sheet patterns once for the whole run
    pub fn new(fields: &FieldConfigs, settings: ExtractionSettings) -> Result<Self> {
        Ok(Self {
            fields: fields.compile()?,
            patterns: settings.compile()?,
            settings,
        })
    }

    /// Resolve the data sheet and the identifier sheet of a workbook
    pub fn resolve_sheets(&self, sheet_names: &[String]) -> Result<ResolvedSheets> {
        let data_sheet = locate_sheet(sheet_names, &self.patterns.data_sheet).ok_or_else(|| {
            ScanError::SheetNotFound {
                patterns: vec![self.patterns.data_sheet.as_str().to_string()],
            }
        })?;
        let identifier_sheet = locate_sheet_chain(sheet_names, &self.patterns.identifier_sheets)?;

        Ok(ResolvedSheets {
            data_sheet: data_sheet.to_string(),
            identifier_sheet: identifier_sheet.to_string(),
        })
    }

    /// Extract one record from an already opened workbook
    pub fn process_source<S: SheetSource>(
        &self,
        path: &Path,
        source: &mut S,
        times: FileTimes,
    ) -> Result<OutputRecord> {
        let sheets = self.resolve_sheets(source.sheet_names())?;
        let data_sheet = source.sheet_grid(&sheets.data_sheet)?;
        let identifier_sheet = source.sheet_grid(&sheets.identifier_sheet)?;

        build_record(RecordInput {
            path,
            data_sheet: &data_sheet,
            identifier_sheet: &identifier_sheet,
            fields: &self.fields,
            identifier_header: &self.patterns.identifier_header,
            missing_label: self.settings.missing_label,
            times,
        })
    }

    /// Open a workbook from disk and extract its record
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<OutputRecord> {
        let path = path.as_ref();
        let mut workbook = CalamineWorkbook::open(path)?;
        let times = FileTimes::from_path(path)?;
        self.process_source(path, &mut workbook, times)
    }

    /// Process files in order, skipping the ones that fail.
    ///
    /// Per-file errors are logged and recorded in the summary; any other error
    /// ends the run. With `max > 0`, stops after `max` successful records.
    pub fn run(&self, files: &[PathBuf], max: usize) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let total = files.len();

        for (idx, path) in files.iter().enumerate() {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            info!(current = idx + 1, total, file = %file_name, "processing file");

            match self.process_file(path) {
                Ok(record) => summary.records.push(record),
                Err(e) if e.is_per_file() => {
                    error!(path = %path.display(), error = %e, "error processing file");
                    summary.failures.push(FileFailure {
                        path: path.clone(),
                        error: e,
                    });
                    continue;
                }
                Err(e) => return Err(e),
            }

            if max > 0 && summary.records.len() == max {
                warn!(max, "maximum number of files reached");
                summary.limit_reached = true;
                break;
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn scanner(json: &str) -> Scanner {
        let fields: FieldConfigs = serde_json::from_str(json).unwrap();
        Scanner::new(&fields, ExtractionSettings::default()).unwrap()
    }

    fn times() -> FileTimes {
        let at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        FileTimes {
            created: at,
            modified: at,
        }
    }

    fn workbook(identifier_sheet: &str) -> MemoryWorkbook {
        MemoryWorkbook::new()
            .with_sheet("Portada", SheetGrid::default())
            .with_sheet(
                "FICHA",
                SheetGrid::from_rows(&[&[], &["", "Name:", "Acme"]]),
            )
            .with_sheet(
                identifier_sheet,
                SheetGrid::from_rows(&[&["Pos", "Registral"], &["1", "R-1"], &["2", "R-1"]]),
            )
    }

    #[test]
    fn test_process_source_end_to_end() {
        let scanner = scanner(r#"{"name": {"regex": "Name:", "offset_x": 1, "offset_y": 0}}"#);
        let mut book = workbook("SAP");

        let record = scanner
            .process_source(Path::new("acme.xlsx"), &mut book, times())
            .unwrap();
        assert_eq!(record.data.len(), 1);
        assert_eq!(record.data["name"], "Acme");
        assert_eq!(record.unique_ids, vec!["R-1"]);
    }

    #[test]
    fn test_identifier_sheet_fallback() {
        let scanner = scanner("{}");
        let resolved = scanner
            .resolve_sheets(workbook("oferta").sheet_names())
            .unwrap();
        assert_eq!(resolved.data_sheet, "FICHA");
        assert_eq!(resolved.identifier_sheet, "oferta");
    }

    #[test]
    fn test_missing_data_sheet() {
        let scanner = scanner("{}");
        let mut book = MemoryWorkbook::new().with_sheet("SAP", SheetGrid::default());

        let result = scanner.process_source(Path::new("x.xlsx"), &mut book, times());
        assert!(matches!(result, Err(ScanError::SheetNotFound { patterns }) if patterns == vec!["^FICHA$"]));
    }

    #[test]
    fn test_missing_identifier_sheet() {
        let scanner = scanner("{}");
        let mut book = workbook("Resumen");

        let result = scanner.process_source(Path::new("x.xlsx"), &mut book, times());
        assert!(matches!(result, Err(ScanError::SheetNotFound { patterns }) if patterns.len() == 2));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let scanner = scanner(r#"{"name": {"regex": "Name:", "offset_x": 1, "offset_y": 0}}"#);
        let mut book = workbook("SAP");

        let first = scanner
            .process_source(Path::new("acme.xlsx"), &mut book, times())
            .unwrap();
        let second = scanner
            .process_source(Path::new("acme.xlsx"), &mut book, times())
            .unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = ExtractionSettings {
            identifier_header: "[".to_string(),
            ..Default::default()
        };
        let result = Scanner::new(&FieldConfigs::default(), settings);
        assert!(matches!(result, Err(ScanError::InvalidPattern { .. })));
    }

    #[test]
    fn test_run_skips_unreadable_files() {
        let scanner = scanner("{}");
        let files = vec![PathBuf::from("missing/a.xlsx"), PathBuf::from("missing/b.xlsx")];

        let summary = scanner.run(&files, 0).unwrap();
        assert!(summary.records.is_empty());
        assert_eq!(summary.failures.len(), 2);
        assert!(!summary.limit_reached);
    }
}
