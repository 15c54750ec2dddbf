//! Analysis result entity

use crate::core::model::ModelId;
use crate::report::PersistedSummary;
use crate::task::task_type::TaskType;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

fn serialize_micros<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Outcome of one successful model call.
///
/// Created by the orchestrator after the model answered; fields are fixed
/// once constructed. The timestamp serializes as an RFC 3339 / ISO-8601
/// UTC string with microsecond precision, the same text as
/// [`AnalysisResult::timestamp_iso`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    task_type: TaskType,
    model: ModelId,
    output: String,
    #[serde(serialize_with = "serialize_micros")]
    timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(
        task_type: TaskType,
        model: ModelId,
        output: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            task_type,
            model,
            output: output.into(),
            timestamp,
        }
    }

    pub fn task_type(&self) -> &TaskType {
        &self.task_type
    }

    pub fn model(&self) -> &ModelId {
        &self.model
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Timestamp as an ISO-8601 string with microsecond precision
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Summary record consumed by the historical report
    pub fn summary(&self) -> PersistedSummary {
        PersistedSummary {
            task_type: self.task_type.to_string(),
            model: self.model.to_string(),
            timestamp: Some(self.timestamp_iso()),
            output_chars: Some(self.output.chars().count()),
        }
    }
}
