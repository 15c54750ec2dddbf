//! Task type value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind of analysis requested for a piece of content (Value Object)
///
/// The built-in variants cover the labels the classifier can produce.
/// Labels read from configuration or persisted records that do not match
/// a built-in variant are kept verbatim in [`TaskType::Other`], so routing
/// tables can carry future task types without code changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskType {
    /// Source code that should be reviewed
    CodeReview,
    /// Reports of defects, stack traces, error messages
    BugAnalysis,
    /// Everything else: prose, specs, requests for docs
    Documentation,
    /// Unknown or future label
    Other(String),
}

impl TaskType {
    /// Get the string label for this task type
    pub fn as_str(&self) -> &str {
        match self {
            TaskType::CodeReview => "code_review",
            TaskType::BugAnalysis => "bug_analysis",
            TaskType::Documentation => "documentation",
            TaskType::Other(label) => label,
        }
    }

    /// All task types the built-in classifier can emit
    pub fn builtin() -> [TaskType; 3] {
        [
            TaskType::CodeReview,
            TaskType::BugAnalysis,
            TaskType::Documentation,
        ]
    }

    /// Check if this is one of the built-in task types
    pub fn is_builtin(&self) -> bool {
        !matches!(self, TaskType::Other(_))
    }

    /// Parse a label, keeping unknown labels as [`TaskType::Other`]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "code_review" => TaskType::CodeReview,
            "bug_analysis" => TaskType::BugAnalysis,
            "documentation" => TaskType::Documentation,
            other => TaskType::Other(other.to_string()),
        }
    }
}

impl Default for TaskType {
    /// Documentation is the last-resort classification
    fn default() -> Self {
        TaskType::Documentation
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl Serialize for TaskType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_label(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_builtin_roundtrip() {
        for task in TaskType::builtin() {
            let parsed: TaskType = task.to_string().parse().unwrap();
            assert_eq!(task, parsed);
            assert!(parsed.is_builtin());
        }
    }

    #[test]
    fn test_unknown_label_kept() {
        let task: TaskType = "security_audit".parse().unwrap();
        assert_eq!(task, TaskType::Other("security_audit".to_string()));
        assert_eq!(task.as_str(), "security_audit");
        assert!(!task.is_builtin());
    }

    #[test]
    fn test_default_is_documentation() {
        assert_eq!(TaskType::default(), TaskType::Documentation);
    }

    #[test]
    fn test_usable_as_map_key() {
        let json = r#"{"bug_analysis": "mistral", "refactoring": "codellama"}"#;
        let map: BTreeMap<TaskType, String> = serde_json::from_str(json).unwrap();
        assert_eq!(map[&TaskType::BugAnalysis], "mistral");
        assert_eq!(
            map[&TaskType::Other("refactoring".to_string())],
            "codellama"
        );
    }
}
