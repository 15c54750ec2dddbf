//! Task classification strategies

use crate::task::task_type::TaskType;

/// Strategy that assigns a [`TaskType`] to raw content.
///
/// Implementations must be total: every input maps to some task type,
/// with [`TaskType::Documentation`] as the last resort. Model selection
/// relies on this to always resolve.
pub trait TaskClassifier: Send + Sync {
    /// Classify the content
    fn classify(&self, content: &str) -> TaskType;
}

/// Markers that indicate a function or class definition
const CODE_MARKERS: &[&str] = &["def ", "class "];

/// Markers that indicate a defect report
const DEFECT_MARKERS: &[&str] = &["bug", "error"];

/// Keyword-based classifier.
///
/// Checks, case-insensitively and in priority order:
/// 1. definition markers (`def `, `class `) → [`TaskType::CodeReview`]
/// 2. `bug` or `error` anywhere → [`TaskType::BugAnalysis`]
/// 3. otherwise → [`TaskType::Documentation`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl TaskClassifier for HeuristicClassifier {
    fn classify(&self, content: &str) -> TaskType {
        let lowered = content.to_lowercase();

        if CODE_MARKERS.iter().any(|m| lowered.contains(m)) {
            TaskType::CodeReview
        } else if DEFECT_MARKERS.iter().any(|m| lowered.contains(m)) {
            TaskType::BugAnalysis
        } else {
            TaskType::Documentation
        }
    }
}
