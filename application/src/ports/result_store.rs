//! Result store port
//!
//! Defines where finished analysis results are persisted.

use pipeline_domain::AnalysisResult;
use thiserror::Error;

/// Errors that can occur while persisting a result
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to write {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode result: {0}")]
    Encode(String),
}

/// Identifier of a persisted record (a path for filesystem stores)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredLocation(String);

impl StoredLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoredLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persists analysis results.
///
/// Each call must write to a location no other call uses, and must fail
/// loudly rather than drop data.
pub trait ResultStore: Send + Sync {
    fn persist(&self, result: &AnalysisResult) -> Result<StoredLocation, PersistenceError>;
}
