//! Generate Report use case
//!
//! Aggregates every persisted run summary into the historical Markdown report.

use crate::ports::summary_source::{ReportError, SummarySource};
use chrono::{DateTime, Utc};
use pipeline_domain::{MarkdownReport, RunStatistics};
use std::sync::Arc;
use tracing::{info, warn};

/// Output of the [`GenerateReportUseCase`]
#[derive(Debug, Clone)]
pub struct HistoricalReport {
    pub markdown: String,
    pub statistics: RunStatistics,
    /// Summary files that could not be read and were left out
    pub skipped: usize,
}

/// Use case for building the historical report
pub struct GenerateReportUseCase {
    source: Arc<dyn SummarySource>,
}

impl GenerateReportUseCase {
    pub fn new(source: Arc<dyn SummarySource>) -> Self {
        Self { source }
    }

    /// Load all summaries and render the report as of `generated_at`.
    ///
    /// Fails only when the source itself is unusable (e.g. the results
    /// root does not exist); an empty source still yields a report.
    pub fn execute(&self, generated_at: DateTime<Utc>) -> Result<HistoricalReport, ReportError> {
        let scan = self.source.load()?;
        if scan.skipped > 0 {
            warn!("Skipped {} unreadable summary file(s)", scan.skipped);
        }

        let statistics = RunStatistics::from_summaries(&scan.summaries);
        info!("Aggregated {} run(s)", statistics.total_runs);

        Ok(HistoricalReport {
            markdown: MarkdownReport::render(&statistics, generated_at),
            statistics,
            skipped: scan.skipped,
        })
    }
}
