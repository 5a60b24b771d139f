//! Environment configuration (`.env` and process variables)

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Root folder holding the offer workbooks, one sub-folder per year
pub const OFFERS_BASE_DIR: &str = "OFFERS_BASE_DIR";
/// Folder where JSON results are written
pub const OUTPUT_DIR: &str = "OUTPUT_DIR";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunEnv {
    pub offers_base_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl RunEnv {
    /// Load `.env` when present, then read the process environment
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env file"),
            Err(e) if e.not_found() => debug!("no .env file found"),
            Err(e) => warn!(error = %e, "failed to load .env file"),
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let dir = |key: &str| get(key).filter(|v| !v.is_empty()).map(PathBuf::from);
        Self {
            offers_base_dir: dir(OFFERS_BASE_DIR),
            output_dir: dir(OUTPUT_DIR),
        }
    }

    /// Folder to scan: `root` if given, else `OFFERS_BASE_DIR`, narrowed to `year`
    pub fn scan_root(&self, root: Option<&Path>, year: Option<&str>) -> Result<PathBuf> {
        let base = match (root, &self.offers_base_dir) {
            (Some(root), _) => root.to_path_buf(),
            (None, Some(base)) => base.clone(),
            (None, None) => bail!("{} is not set; pass --root or define it in .env", OFFERS_BASE_DIR),
        };
        Ok(match year {
            Some(year) => base.join(year),
            None => base,
        })
    }

    /// Output file location under `OUTPUT_DIR` (or relative to the working directory)
    pub fn output_path(&self, name: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(name),
            None => name.to_path_buf(),
        }
    }
}
