//! Persisted run summary

use serde::{Deserialize, Deserializer, Serialize};

fn unknown() -> String {
    "unknown".to_string()
}

/// A string field, or `None` for `null` and values of any other type
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(text) => Some(text),
        Loose::Other(_) => None,
    })
}

fn label_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_else(unknown))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Count(usize),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Count(count) => Some(count),
        Loose::Other(_) => None,
    })
}

/// The per-run record the report is built from (`workflow_summary.json`).
///
/// Missing or mistyped fields are tolerated so older or hand-edited
/// summaries still count: labels fall back to `"unknown"`, the optional
/// fields to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSummary {
    #[serde(default = "unknown", deserialize_with = "label_or_unknown")]
    pub task_type: String,
    #[serde(default = "unknown", deserialize_with = "label_or_unknown")]
    pub model: String,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_chars: Option<usize>,
}

impl PersistedSummary {
    pub fn new(task_type: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            task_type: task_type.into(),
            model: model.into(),
            timestamp: None,
            output_chars: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}
