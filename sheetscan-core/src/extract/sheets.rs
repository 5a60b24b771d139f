//! Sheet lookup by name pattern

use crate::error::{Result, ScanError};
use regex::Regex;

/// First sheet, in workbook order, whose name matches the pattern
pub fn locate_sheet<'a>(sheet_names: &'a [String], pattern: &Regex) -> Option<&'a str> {
    sheet_names
        .iter()
        .find(|name| pattern.is_match(name))
        .map(String::as_str)
}

/// Try each pattern in priority order; fail with every pattern attempted
pub fn locate_sheet_chain<'a>(sheet_names: &'a [String], patterns: &[Regex]) -> Result<&'a str> {
    patterns
        .iter()
        .find_map(|pattern| locate_sheet(sheet_names, pattern))
        .ok_or_else(|| ScanError::SheetNotFound {
            patterns: patterns.iter().map(|p| p.as_str().to_string()).collect(),
        })
}
