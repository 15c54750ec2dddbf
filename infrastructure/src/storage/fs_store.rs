//! Filesystem [`ResultStore`] adapter

use super::run_directory::RunDirectoryManager;
use super::{ANALYSIS_FILE, SUMMARY_FILE};
use pipeline_application::{PersistenceError, ResultStore, StoredLocation};
use pipeline_domain::AnalysisResult;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes each result into a fresh run directory.
#[derive(Debug, Clone)]
pub struct FsResultStore {
    runs: RunDirectoryManager,
}

impl FsResultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            runs: RunDirectoryManager::new(root),
        }
    }

    pub fn root(&self) -> &Path {
        self.runs.root()
    }

    fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| PersistenceError::Encode(e.to_string()))?;
        std::fs::write(path, json).map_err(|source| PersistenceError::Io {
            location: path.display().to_string(),
            source,
        })
    }
}

impl ResultStore for FsResultStore {
    fn persist(&self, result: &AnalysisResult) -> Result<StoredLocation, PersistenceError> {
        let run_dir = self
            .runs
            .create_run_dir_at(result.timestamp())
            .map_err(|source| PersistenceError::Io {
                location: self.runs.root().display().to_string(),
                source,
            })?;

        let analysis = run_dir.join(ANALYSIS_FILE);
        Self::write_json(&analysis, result)?;
        Self::write_json(&run_dir.join(SUMMARY_FILE), &result.summary())?;

        debug!("Wrote {} and {}", ANALYSIS_FILE, SUMMARY_FILE);
        Ok(StoredLocation::new(analysis.display().to_string()))
    }
}
