//! Historical report domain
//!
//! Aggregation of persisted run summaries and rendering of the Markdown
//! report. Everything here is pure; discovering summaries on disk is an
//! adapter concern.

mod markdown;
mod statistics;
mod summary;

pub use markdown::{MIN_RUNS_FOR_TRENDS, MarkdownReport};
pub use statistics::{RunStatistics, UsageCount};
pub use summary::PersistedSummary;
