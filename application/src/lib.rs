//! Application layer for ollama-pipeline
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    model_executor::{ExecutionError, ModelExecutor, ModelRequest},
    progress::{AnalysisProgressNotifier, NoProgress},
    result_store::{PersistenceError, ResultStore, StoredLocation},
    summary_source::{ReportError, SummaryScan, SummarySource},
};
pub use use_cases::analyze_content::{
    AnalyzeContentUseCase, AnalyzeError, RoutingDecision, route_content,
};
pub use use_cases::generate_report::{GenerateReportUseCase, HistoricalReport};
