//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid model identifier: {0:?}")]
    InvalidModelId(String),

    /// Reserved for classifiers that can reject their input.
    /// [`HeuristicClassifier`](crate::HeuristicClassifier) never produces it.
    #[error("Classification failed: {0}")]
    Classification(String),
}

impl DomainError {
    /// Check if this error came from a classifier
    pub fn is_classification(&self) -> bool {
        matches!(self, DomainError::Classification(_))
    }
}
