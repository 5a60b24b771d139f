//! Recursive discovery of spreadsheet files

use crate::error::Result;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Per-extension file counts under a root directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtensionCounts {
    pub xlsx: usize,
    pub xlsm: usize,
    pub xls: usize,
    pub other: usize,
}

impl ExtensionCounts {
    pub fn total(&self) -> usize {
        self.xlsx + self.xlsm + self.xls + self.other
    }

    /// The four report lines, one per bucket
    pub fn report_lines(&self) -> [String; 4] {
        [
            format!("xlsx files total count: {}", self.xlsx),
            format!("xlsm files total count: {}", self.xlsm),
            format!("xls files total count: {}", self.xls),
            format!("rest of the files total count: {}", self.other),
        ]
    }
}

impl fmt::Display for ExtensionCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.report_lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Editor lock files (`~$Book.xlsx`) and other `~`-prefixed temporaries
fn is_temporary(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('~')
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Regular, non-temporary files under `root`; a traversal error aborts the walk
fn candidate_files(root: &Path) -> impl Iterator<Item = Result<DirEntry>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() && !is_temporary(&entry) => Some(Ok(entry)),
            Ok(_) => None,
            Err(e) => Some(Err(e.into())),
        })
}

/// Count files by extension bucket without collecting their paths
pub fn count_files<P: AsRef<Path>>(root: P) -> Result<ExtensionCounts> {
    let root = root.as_ref();
    info!(root = %root.display(), "scanning root folder for Excel files");

    let mut counts = ExtensionCounts::default();
    for entry in candidate_files(root) {
        let entry = entry?;
        let path = entry.path();
        if has_extension(path, "xlsx") {
            counts.xlsx += 1;
        } else if has_extension(path, "xlsm") {
            counts.xlsm += 1;
        } else if has_extension(path, "xls") {
            counts.xls += 1;
        } else {
            counts.other += 1;
        }
    }

    debug!(total = counts.total(), "file count finished");
    Ok(counts)
}

/// Collect every `.xlsx` path under `root`, in traversal order
pub fn collect_xlsx<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    info!(root = %root.display(), "scanning root folder for Excel files");

    let mut files = Vec::new();
    for entry in candidate_files(root) {
        let entry = entry?;
        if has_extension(entry.path(), "xlsx") {
            files.push(entry.into_path());
        }
    }

    debug!(found = files.len(), "xlsx collection finished");
    Ok(files)
}
