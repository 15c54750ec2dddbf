//! Progress notification port
//!
//! Defines the interface for reporting progress during an analysis run.

use crate::ports::result_store::StoredLocation;
use pipeline_domain::{ModelId, TaskType};

/// Callback for progress updates during an analysis run
///
/// Implementations live in the presentation layer. All methods default to
/// no-ops; progress is observational and never affects the run.
pub trait AnalysisProgressNotifier: Send + Sync {
    /// Called once the content has a task type
    fn on_task_classified(&self, _task: &TaskType) {}

    /// Called once the model is chosen
    fn on_model_selected(&self, _task: &TaskType, _model: &ModelId) {}

    /// Called right before the model call
    fn on_dispatch_start(&self, _model: &ModelId) {}

    /// Called when the model call ends
    fn on_dispatch_complete(&self, _model: &ModelId, _success: bool) {}

    /// Called after the result has been stored
    fn on_result_persisted(&self, _location: &StoredLocation) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl AnalysisProgressNotifier for NoProgress {}
