//! Model executor port
//!
//! Defines the interface for running a prompt against a named model.

use async_trait::async_trait;
use pipeline_domain::ModelId;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while running a model query.
///
/// Every variant carries the model identifier so failures can be traced
/// back to the routing decision.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Model '{model}' did not respond within {seconds}s")]
    Timeout { model: ModelId, seconds: u64 },

    #[error("Model '{model}' failed: {message}")]
    Failed { model: ModelId, message: String },

    #[error("Model '{model}' is not available: {message}")]
    Unavailable { model: ModelId, message: String },
}

impl ExecutionError {
    /// The model the failed request was addressed to
    pub fn model(&self) -> &ModelId {
        match self {
            ExecutionError::Timeout { model, .. }
            | ExecutionError::Failed { model, .. }
            | ExecutionError::Unavailable { model, .. } => model,
        }
    }

    /// Check if this error represents a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExecutionError::Timeout { .. })
    }
}

/// A single prompt dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    pub model: ModelId,
    pub prompt: String,
    /// Upper bound for the call; adapters should stop work once it passes
    pub timeout: Duration,
}

impl ModelRequest {
    pub fn new(model: ModelId, prompt: impl Into<String>, timeout: Duration) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            timeout,
        }
    }

    pub(crate) fn timeout_error(&self) -> ExecutionError {
        ExecutionError::Timeout {
            model: self.model.clone(),
            seconds: self.timeout.as_secs(),
        }
    }
}

/// Runs prompts against external models.
///
/// This port defines how the application layer reaches a model.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ModelExecutor: Send + Sync {
    /// Send the prompt and return the response text
    async fn execute(&self, request: &ModelRequest) -> Result<String, ExecutionError>;

    /// Short adapter name for diagnostics
    fn name(&self) -> &'static str;
}
