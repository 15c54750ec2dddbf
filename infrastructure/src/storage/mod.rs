//! Filesystem result storage
//!
//! Layout under the results root:
//!
//! ```text
//! results/
//! ├── 20250101_120000/
//! │   ├── analysis.json          full AnalysisResult
//! │   └── workflow_summary.json  record read by the reporter
//! ├── 20250101_120000_1/         same-second run
//! └── historical_report.md
//! ```

mod fs_store;
mod run_directory;
mod summary_loader;

pub use fs_store::FsResultStore;
pub use run_directory::RunDirectoryManager;
pub use summary_loader::FsSummarySource;

/// Default results root, relative to the working directory
pub const DEFAULT_RESULTS_DIR: &str = "results";
pub const ANALYSIS_FILE: &str = "analysis.json";
pub const SUMMARY_FILE: &str = "workflow_summary.json";
pub const REPORT_FILE: &str = "historical_report.md";
