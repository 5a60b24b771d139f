//! Excel/ODS file reader using calamine

use crate::error::{Result, ScanError};
use calamine::{Reader, Sheets, open_workbook_auto};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub mod workbook;

pub use workbook::{CellRef, SheetGrid, cell_text};

/// Access to the sheets of an opened workbook
pub trait SheetSource {
    /// Sheet names in workbook order
    fn sheet_names(&self) -> &[String];

    /// All rows of a sheet as a grid of strings
    fn sheet_grid(&mut self, name: &str) -> Result<SheetGrid>;
}

/// Workbook on disk, read through calamine (xlsx, xlsm, xls, ods)
pub struct CalamineWorkbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
    names: Vec<String>,
}

impl CalamineWorkbook {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let sheets: Sheets<_> = open_workbook_auto(path).map_err(|e| ScanError::WorkbookOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let names = sheets.sheet_names();

        Ok(Self {
            path: path.to_path_buf(),
            sheets,
            names,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for CalamineWorkbook {
    fn sheet_names(&self) -> &[String] {
        &self.names
    }

    fn sheet_grid(&mut self, name: &str) -> Result<SheetGrid> {
        let range = self
            .sheets
            .worksheet_range(name)
            .map_err(|e| ScanError::SheetRead {
                sheet: name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(SheetGrid::from_range(&range))
    }
}

/// Workbook held in memory, for callers that already have the grids
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    names: Vec<String>,
    grids: Vec<SheetGrid>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, grid: SheetGrid) -> Self {
        self.names.push(name.into());
        self.grids.push(grid);
        self
    }
}

impl SheetSource for MemoryWorkbook {
    fn sheet_names(&self) -> &[String] {
        &self.names
    }

    fn sheet_grid(&mut self, name: &str) -> Result<SheetGrid> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.grids[idx].clone())
            .ok_or_else(|| ScanError::SheetRead {
                sheet: name.to_string(),
                reason: "no such sheet".to_string(),
            })
    }
}
