//! Merged pipeline settings

use super::executor::ExecutorSettings;
use super::validation::{ConfigIssue, ConfigIssueCode};
use crate::core::model::ModelId;
use crate::prompt::PromptTemplates;
use crate::task::selection::{TaskModelMap, select_model};
use crate::task::task_type::TaskType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Role-based model configuration (`models` section).
///
/// `default` and `classifier` always resolve: when a replacing `models`
/// section omits them, the baseline identifier is used. Any other key is a
/// free-form named role.
///
/// # Example
///
/// ```yaml
/// models:
///   default: llama3.2:1b
///   classifier: llama3.2:1b
///   reviewer: qwen2.5-coder:7b
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRoles {
    /// Model used when no assignment matches
    #[serde(default)]
    pub default: ModelId,
    /// Model reserved for model-backed classification
    #[serde(default)]
    pub classifier: ModelId,
    /// Additional named roles
    #[serde(flatten)]
    pub extra: BTreeMap<String, ModelId>,
}

impl Default for ModelRoles {
    fn default() -> Self {
        Self {
            default: ModelId::baseline(),
            classifier: ModelId::baseline(),
            extra: BTreeMap::new(),
        }
    }
}

impl ModelRoles {
    /// Look up a role by name
    pub fn role(&self, name: &str) -> Option<&ModelId> {
        match name {
            "default" => Some(&self.default),
            "classifier" => Some(&self.classifier),
            other => self.extra.get(other),
        }
    }
}

/// Numeric limits (`thresholds` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Upper bound for one model call, in seconds
    pub max_response_time: u64,
    /// Responses shorter than this (in chars) are flagged
    pub min_response_length: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_response_time: 60,
            min_response_length: 0,
        }
    }
}

/// Fully merged, immutable pipeline settings.
///
/// Build it once per invocation and pass it by reference.
/// [`Settings::baseline`] is the built-in layer every other layer sits on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub models: ModelRoles,
    pub model_assignments: TaskModelMap,
    pub prompts: PromptTemplates,
    pub thresholds: Thresholds,
    pub executor: ExecutorSettings,
}

impl Settings {
    /// Built-in defaults
    pub fn baseline() -> Self {
        Self::default()
    }

    /// The model for a task type, falling back to `models.default`
    pub fn model_for(&self, task: &TaskType) -> &ModelId {
        select_model(task, &self.model_assignments, &self.models.default)
    }

    /// `max_response_time` as a [`Duration`]
    pub fn response_timeout(&self) -> Duration {
        Duration::from_secs(self.thresholds.max_response_time)
    }

    // ==================== Builder Methods ====================

    pub fn with_default_model(mut self, model: ModelId) -> Self {
        self.models.default = model;
        self
    }

    pub fn with_assignment(mut self, task: TaskType, model: ModelId) -> Self {
        self.model_assignments.insert(task, model);
        self
    }

    pub fn with_prompt(mut self, task: TaskType, template: impl Into<String>) -> Self {
        self.prompts.insert(task, template.into());
        self
    }

    pub fn with_max_response_time(mut self, seconds: u64) -> Self {
        self.thresholds.max_response_time = seconds;
        self
    }

    /// Check the merged settings, returning all detected issues.
    ///
    /// 1. Routing keys that are not built-in task types (typo guard)
    /// 2. A zero response timeout
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let routing_keys = self
            .model_assignments
            .keys()
            .map(|task| ("model_assignments", task))
            .chain(self.prompts.keys().map(|task| ("prompts", task)));

        for (field, task) in routing_keys {
            if !task.is_builtin() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownTaskType {
                        field: field.to_string(),
                        value: task.to_string(),
                    },
                    format!(
                        "{}: '{}' is not a built-in task type (expected one of {}); \
                         it only applies to content routed to that exact label",
                        field,
                        task,
                        builtin_labels()
                    ),
                ));
            }
        }

        if self.thresholds.max_response_time == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "thresholds.max_response_time must be at least 1 second",
            ));
        }

        issues
    }
}

fn builtin_labels() -> String {
    TaskType::builtin()
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
