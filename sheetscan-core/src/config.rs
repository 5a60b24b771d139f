//! Field configuration and extraction settings

use crate::error::{Result, ScanError};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default pattern of the sheet holding the labeled fields
pub const DEFAULT_DATA_SHEET: &str = "^FICHA$";
/// Default identifier sheet patterns, tried in order
pub const DEFAULT_IDENTIFIER_SHEETS: [&str; 2] = ["^SAP$", "^OFERTA$"];
/// Default header of the identifier column
pub const DEFAULT_IDENTIFIER_HEADER: &str = "Registral";

/// Compile a pattern the way every lookup in this crate matches: case-insensitively
pub fn case_insensitive(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ScanError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// One entry of the field configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Label pattern, matched case-insensitively
    pub regex: String,
    /// Columns to move right from the label (negative moves left)
    #[serde(default)]
    pub offset_x: i64,
    /// Rows to move up from the label (negative moves down)
    #[serde(default)]
    pub offset_y: i64,
}

/// A field whose label pattern has been compiled
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: String,
    pub pattern: Regex,
    pub offset_x: i64,
    pub offset_y: i64,
}

/// Mapping from field name to its configuration, iterated in name order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldConfigs {
    pub fields: BTreeMap<String, FieldConfig>,
}

impl FieldConfigs {
    /// Load the field configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ScanError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ScanError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Compile every label pattern, sorted by field name
    pub fn compile(&self) -> Result<Vec<FieldRule>> {
        self.fields
            .iter()
            .map(|(name, config)| {
                Ok(FieldRule {
                    name: name.clone(),
                    pattern: case_insensitive(&config.regex)?,
                    offset_x: config.offset_x,
                    offset_y: config.offset_y,
                })
            })
            .collect()
    }
}

/// What to do when a field's label is absent from the data sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingLabelPolicy {
    /// Omit the field from the record
    #[default]
    Skip,
    /// Abort the file with `LabelNotFound`
    Fail,
}

/// Which sheets and columns to read from each workbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSettings {
    pub data_sheet: String,
    pub identifier_sheets: Vec<String>,
    pub identifier_header: String,
    #[serde(default)]
    pub missing_label: MissingLabelPolicy,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            data_sheet: DEFAULT_DATA_SHEET.to_string(),
            identifier_sheets: DEFAULT_IDENTIFIER_SHEETS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            identifier_header: DEFAULT_IDENTIFIER_HEADER.to_string(),
            missing_label: MissingLabelPolicy::Skip,
        }
    }
}

/// Compiled form of [`ExtractionSettings`]
#[derive(Debug, Clone)]
pub(crate) struct SheetPatterns {
    pub data_sheet: Regex,
    pub identifier_sheets: Vec<Regex>,
    pub identifier_header: Regex,
}

impl ExtractionSettings {
    pub(crate) fn compile(&self) -> Result<SheetPatterns> {
        Ok(SheetPatterns {
            data_sheet: case_insensitive(&self.data_sheet)?,
            identifier_sheets: self
                .identifier_sheets
                .iter()
                .map(|p| case_insensitive(p))
                .collect::<Result<Vec<_>>>()?,
            identifier_header: case_insensitive(&self.identifier_header)?,
        })
    }
}
