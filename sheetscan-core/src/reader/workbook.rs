//! Sheet grid and cell coordinate types

use crate::error::{Result, ScanError};
use calamine::{Data, Range};
use regex::Regex;
use std::fmt;

/// Last addressable column of a worksheet (XFD)
pub const MAX_COLUMNS: i64 = 16_384;
/// Last addressable row of a worksheet
pub const MAX_ROWS: i64 = 1_048_576;

/// One-indexed cell coordinate (e.g., column 3, row 5 is C5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub col: u32,
    pub row: u32,
}

impl CellRef {
    /// Build a reference, rejecting coordinates outside the worksheet
    pub fn new(col: i64, row: i64) -> Result<Self> {
        if !(1..=MAX_COLUMNS).contains(&col) || !(1..=MAX_ROWS).contains(&row) {
            return Err(ScanError::CellCoordinate { col, row });
        }
        Ok(Self {
            col: col as u32,
            row: row as u32,
        })
    }

    /// Apply a field offset: right by `offset_x`, up by `offset_y`
    pub fn offset(&self, offset_x: i64, offset_y: i64) -> Result<Self> {
        // Saturated coordinates are out of the worksheet and rejected by `new`
        Self::new(
            (self.col as i64).saturating_add(offset_x),
            (self.row as i64).saturating_sub(offset_y),
        )
    }

    /// Parse an A1-style reference ("C5", "$AB$10")
    pub fn parse(reference: &str) -> Result<Self> {
        let reference = reference.replace('$', "");
        let split = reference
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(reference.len());
        let (letters, digits) = reference.split_at(split);

        if letters.is_empty()
            || digits.is_empty()
            || !letters.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(ScanError::CellCoordinate { col: 0, row: 0 });
        }

        let mut col = 0i64;
        for ch in letters.chars() {
            col = col * 26 + (ch.to_ascii_uppercase() as i64 - 'A' as i64 + 1);
            if col > MAX_COLUMNS {
                return Err(ScanError::CellCoordinate { col, row: 0 });
            }
        }
        let row = digits
            .parse::<i64>()
            .map_err(|_| ScanError::CellCoordinate { col, row: 0 })?;

        Self::new(col, row)
    }

    /// Column letters for a one-indexed column (1 -> A, 27 -> AA)
    fn col_to_letters(col: u32) -> String {
        let mut col = col;
        let mut result = String::new();
        while col > 0 {
            let rem = (col - 1) % 26;
            result.insert(0, (b'A' + rem as u8) as char);
            col = (col - 1) / 26;
        }
        result
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::col_to_letters(self.col), self.row)
    }
}

/// Jagged row-major grid of cell texts anchored at A1
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetGrid {
    rows: Vec<Vec<String>>,
}

impl SheetGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Convenience constructor for literal grids
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    /// Build a grid from a calamine range, padding up to A1 and trimming trailing blanks
    pub fn from_range(range: &Range<Data>) -> Self {
        let Some((start_row, start_col)) = range.start() else {
            return Self::default();
        };

        let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
        for row in range.rows() {
            let mut cells = vec![String::new(); start_col as usize];
            cells.extend(row.iter().map(cell_text));
            while cells.last().is_some_and(|c| c.is_empty()) {
                cells.pop();
            }
            rows.push(cells);
        }
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Text at a one-indexed coordinate; cells beyond the grid read as empty
    pub fn cell(&self, cell: CellRef) -> &str {
        let (Some(row), Some(col)) = (
            (cell.row as usize).checked_sub(1),
            (cell.col as usize).checked_sub(1),
        ) else {
            return "";
        };
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// First cell, row by row then column by column, whose text matches the pattern
    pub fn find(&self, pattern: &Regex) -> Option<CellRef> {
        self.rows.iter().enumerate().find_map(|(row_idx, row)| {
            row.iter()
                .position(|text| pattern.is_match(text))
                .map(|col_idx| CellRef {
                    col: col_idx as u32 + 1,
                    row: row_idx as u32 + 1,
                })
        })
    }
}

/// Render a calamine cell the way it reads on screen
pub fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => e.to_string(),
        // Date serial number; number formats are not evaluated
        Data::DateTime(dt) => dt.as_f64().to_string(),
    }
}
