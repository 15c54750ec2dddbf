//! Summary source port
//!
//! Discovery of persisted run summaries for the historical report.

use pipeline_domain::PersistedSummary;
use thiserror::Error;

/// Errors that stop report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Results directory not found: {0}")]
    ResultsRootMissing(String),

    #[error("Failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

/// Summaries found by a scan
#[derive(Debug, Clone, Default)]
pub struct SummaryScan {
    pub summaries: Vec<PersistedSummary>,
    /// Summary files that existed but could not be read
    pub skipped: usize,
}

/// Loads every persisted summary.
///
/// Unreadable individual records are skipped and counted, not fatal.
pub trait SummarySource: Send + Sync {
    fn load(&self) -> Result<SummaryScan, ReportError>;
}
