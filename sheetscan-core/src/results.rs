//! Persisted results log and the new-file diff

use crate::error::{Result, ScanError};
use crate::record::OutputRecord;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Paths in `current` not among the `known` file keys, in `current` order
pub fn new_files(known: &HashSet<&str>, current: &[PathBuf]) -> Vec<PathBuf> {
    current
        .iter()
        .filter(|path| !known.contains(path.display().to_string().as_str()))
        .cloned()
        .collect()
}

/// Ordered collection of records, keyed by source path for diffing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultLog {
    records: Vec<OutputRecord>,
}

impl ResultLog {
    pub fn new(records: Vec<OutputRecord>) -> Self {
        Self { records }
    }

    /// Load a log written by a previous run; a `null` document reads as empty
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ScanError::LogRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let records: Option<Vec<OutputRecord>> =
            serde_json::from_str(&content).map_err(|e| ScanError::LogRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            records: records.unwrap_or_default(),
        })
    }

    /// Write the log as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.records).map_err(|e| ScanError::LogWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, json).map_err(|e| ScanError::LogWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        info!(path = %path.display(), records = self.records.len(), "results log written");
        Ok(())
    }

    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        let key = path.display().to_string();
        self.records.iter().any(|record| record.file == key)
    }

    /// File keys of every logged record
    pub fn files(&self) -> HashSet<&str> {
        self.records.iter().map(|record| record.file.as_str()).collect()
    }

    /// Files of the current listing that this log has not seen yet
    pub fn new_files(&self, current: &[PathBuf]) -> Vec<PathBuf> {
        new_files(&self.files(), current)
    }

    /// Append records whose path is not already logged; returns how many were added
    pub fn merge(&mut self, records: Vec<OutputRecord>) -> usize {
        let mut known: HashSet<String> = self.records.iter().map(|r| r.file.clone()).collect();
        let before = self.records.len();
        for record in records {
            if known.insert(record.file.clone()) {
                self.records.push(record);
            }
        }
        self.records.len() - before
    }
}
