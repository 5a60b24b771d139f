//! Distinct values of a header-selected column

use crate::error::{Result, ScanError};
use crate::reader::SheetGrid;
use regex::Regex;
use std::collections::HashSet;

/// Collect the distinct non-blank values below the first header matching `header`.
///
/// Only the first row is searched for the header. Values are trimmed and kept in
/// first-seen order; rows too short to reach the column are skipped.
pub fn collect_unique(grid: &SheetGrid, header: &Regex) -> Result<Vec<String>> {
    let column_not_found = || ScanError::ColumnNotFound {
        pattern: header.as_str().to_string(),
    };

    let (header_row, data_rows) = grid.rows().split_first().ok_or_else(column_not_found)?;
    let column = header_row
        .iter()
        .position(|cell| header.is_match(cell))
        .ok_or_else(column_not_found)?;

    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for value in data_rows
        .iter()
        .filter_map(|row| row.get(column))
        .map(|cell| cell.trim())
        .filter(|value| !value.is_empty())
    {
        if seen.insert(value) {
            values.push(value.to_string());
        }
    }

    Ok(values)
}
