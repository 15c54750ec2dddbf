//! Filesystem [`SummarySource`] adapter

use super::SUMMARY_FILE;
use pipeline_application::{ReportError, SummaryScan, SummarySource};
use pipeline_domain::PersistedSummary;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Why one run's summary was skipped
#[derive(Error, Debug)]
enum SummaryReadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads `workflow_summary.json` from every run directory under a root.
#[derive(Debug, Clone)]
pub struct FsSummarySource {
    root: PathBuf,
}

impl FsSummarySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `Ok(None)` when the directory has no summary file
    fn read_summary(run_dir: &Path) -> Result<Option<PersistedSummary>, SummaryReadError> {
        let path = run_dir.join(SUMMARY_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn run_dirs(&self) -> Result<Vec<PathBuf>, ReportError> {
        let io_error = |source| ReportError::Io {
            location: self.root.display().to_string(),
            source,
        };

        let mut dirs = Vec::new();
        for entry in std::fs::read_dir(&self.root).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();
        Ok(dirs)
    }
}

impl SummarySource for FsSummarySource {
    fn load(&self) -> Result<SummaryScan, ReportError> {
        if !self.root.is_dir() {
            return Err(ReportError::ResultsRootMissing(
                self.root.display().to_string(),
            ));
        }

        let mut scan = SummaryScan::default();
        for run_dir in self.run_dirs()? {
            match Self::read_summary(&run_dir) {
                Ok(Some(summary)) => scan.summaries.push(summary),
                Ok(None) => debug!("No summary in {}", run_dir.display()),
                Err(e) => {
                    warn!("Skipping {}: {}", run_dir.display(), e);
                    scan.skipped += 1;
                }
            }
        }

        debug!(
            "Loaded {} run summaries from {} ({} skipped)",
            scan.summaries.len(),
            self.root.display(),
            scan.skipped
        );
        Ok(scan)
    }
}
