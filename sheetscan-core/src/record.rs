//! Output records, one per processed workbook

use crate::config::{FieldRule, MissingLabelPolicy};
use crate::error::{Result, ScanError};
use crate::extract::{collect_unique, extract_fields};
use crate::reader::SheetGrid;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Extracted content of one workbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub file: String,
    pub base_name: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unique_ids: Vec<String>,
}

/// Older logs write `null` for empty collections
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Filesystem timestamps of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTimes {
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl FileTimes {
    /// Read timestamps from the filesystem; creation falls back to modification
    /// time where the platform does not record birth time.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|source| ScanError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let modified = metadata
            .modified()
            .map_err(|source| ScanError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?;
        let created = metadata.created().unwrap_or(modified);

        Ok(Self {
            created: created.into(),
            modified: modified.into(),
        })
    }
}

/// Inputs for one record, with both sheets already resolved
pub struct RecordInput<'a> {
    pub path: &'a Path,
    pub data_sheet: &'a SheetGrid,
    pub identifier_sheet: &'a SheetGrid,
    pub fields: &'a [FieldRule],
    pub identifier_header: &'a Regex,
    pub missing_label: MissingLabelPolicy,
    pub times: FileTimes,
}

/// Compose the field map, identifier list and file metadata into a record
pub fn build_record(input: RecordInput<'_>) -> Result<OutputRecord> {
    let data = extract_fields(input.data_sheet, input.fields, input.missing_label)?;
    let unique_ids = collect_unique(input.identifier_sheet, input.identifier_header)?;

    let base_name = input
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(OutputRecord {
        file: input.path.display().to_string(),
        base_name,
        created_at: input.times.created,
        modified_at: input.times.modified,
        data,
        unique_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldConfigs, case_insensitive};
    use chrono::TimeZone;

    fn times() -> FileTimes {
        FileTimes {
            created: Utc.with_ymd_and_hms(2023, 3, 1, 9, 30, 0).unwrap(),
            modified: Utc.with_ymd_and_hms(2023, 4, 2, 18, 0, 0).unwrap(),
        }
    }

    fn fields() -> Vec<FieldRule> {
        serde_json::from_str::<FieldConfigs>(
            r#"{"name": {"regex": "Name:", "offset_x": 1, "offset_y": 0}}"#,
        )
        .unwrap()
        .compile()
        .unwrap()
    }

    #[test]
    fn test_build_record() {
        let data_sheet = SheetGrid::from_rows(&[&[], &["", "Name:", "Acme"]]);
        let identifier_sheet =
            SheetGrid::from_rows(&[&["Registral"], &["R-1"], &["R-2"], &["R-1"]]);
        let fields = fields();
        let header = case_insensitive("Registral").unwrap();

        let record = build_record(RecordInput {
            path: Path::new("offers/2023/acme.xlsx"),
            data_sheet: &data_sheet,
            identifier_sheet: &identifier_sheet,
            fields: &fields,
            identifier_header: &header,
            missing_label: MissingLabelPolicy::Skip,
            times: times(),
        })
        .unwrap();

        assert_eq!(record.file, "offers/2023/acme.xlsx");
        assert_eq!(record.base_name, "acme.xlsx");
        assert_eq!(record.data["name"], "Acme");
        assert_eq!(record.unique_ids, vec!["R-1", "R-2"]);
        assert_eq!(record.created_at, times().created);
    }

    #[test]
    fn test_missing_identifier_column_fails() {
        let data_sheet = SheetGrid::from_rows(&[&["Name:", "Acme"]]);
        let identifier_sheet = SheetGrid::from_rows(&[&["Other"], &["x"]]);
        let fields = fields();
        let header = case_insensitive("Registral").unwrap();

        let result = build_record(RecordInput {
            path: Path::new("acme.xlsx"),
            data_sheet: &data_sheet,
            identifier_sheet: &identifier_sheet,
            fields: &fields,
            identifier_header: &header,
            missing_label: MissingLabelPolicy::Skip,
            times: times(),
        });
        assert!(matches!(result, Err(ScanError::ColumnNotFound { .. })));
    }

    #[test]
    fn test_serialized_field_names() {
        let record = OutputRecord {
            file: "a.xlsx".to_string(),
            base_name: "a.xlsx".to_string(),
            created_at: times().created,
            modified_at: times().modified,
            data: BTreeMap::from([("name".to_string(), "Acme".to_string())]),
            unique_ids: vec!["R-1".to_string()],
        };
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["file"], "a.xlsx");
        assert_eq!(value["base_name"], "a.xlsx");
        assert_eq!(value["created_at"], "2023-03-01T09:30:00Z");
        assert_eq!(value["modified_at"], "2023-04-02T18:00:00Z");
        assert_eq!(value["data"]["name"], "Acme");
        assert_eq!(value["unique_ids"][0], "R-1");
    }

    #[test]
    fn test_null_collections_read_as_empty() {
        let json = r#"{
            "file": "C:\\offers\\a.xlsx",
            "base_name": "a.xlsx",
            "created_at": "2023-03-01T10:30:00.123456+01:00",
            "modified_at": "2023-03-01T10:30:00+01:00",
            "data": null,
            "unique_ids": null
        }"#;
        let record: OutputRecord = serde_json::from_str(json).unwrap();

        assert!(record.data.is_empty());
        assert!(record.unique_ids.is_empty());
        assert_eq!(record.modified_at, times().created);
    }

    #[test]
    fn test_file_times_missing_file() {
        let result = FileTimes::from_path("does/not/exist.xlsx");
        assert!(matches!(result, Err(ScanError::FileAccess { .. })));
    }
}
