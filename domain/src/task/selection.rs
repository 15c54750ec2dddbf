//! Model selection policy

use crate::core::model::ModelId;
use crate::task::task_type::TaskType;
use std::collections::BTreeMap;

/// Task type → model override table (`model_assignments` in config)
pub type TaskModelMap = BTreeMap<TaskType, ModelId>;

/// Pick the model for a task type.
///
/// Returns the assigned model when the table has an entry for `task`,
/// otherwise `default_model`. Unknown task types simply miss the table.
pub fn select_model<'a>(
    task: &TaskType,
    assignments: &'a TaskModelMap,
    default_model: &'a ModelId,
) -> &'a ModelId {
    assignments.get(task).unwrap_or(default_model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str) -> ModelId {
        ModelId::new(name).unwrap()
    }

    #[test]
    fn test_override_wins() {
        let mut assignments = TaskModelMap::new();
        assignments.insert(TaskType::BugAnalysis, model("mistral"));
        let default = model("llama3.2:1b");

        assert_eq!(
            select_model(&TaskType::BugAnalysis, &assignments, &default),
            &model("mistral")
        );
    }

    #[test]
    fn test_missing_entry_falls_back_to_default() {
        let mut assignments = TaskModelMap::new();
        assignments.insert(TaskType::BugAnalysis, model("mistral"));
        let default = model("llama3.2:1b");

        assert_eq!(
            select_model(&TaskType::CodeReview, &assignments, &default),
            &default
        );
        assert_eq!(
            select_model(&TaskType::Documentation, &TaskModelMap::new(), &default),
            &default
        );
    }

    #[test]
    fn test_unknown_task_types() {
        let other = TaskType::Other("security_audit".to_string());
        let default = model("llama3.2:1b");

        assert_eq!(select_model(&other, &TaskModelMap::new(), &default), &default);

        let mut assignments = TaskModelMap::new();
        assignments.insert(other.clone(), model("codellama"));
        assert_eq!(
            select_model(&other, &assignments, &default),
            &model("codellama")
        );
    }

    #[test]
    fn test_selection_is_idempotent() {
        let mut assignments = TaskModelMap::new();
        assignments.insert(TaskType::CodeReview, model("qwen2.5-coder"));
        let default = model("llama3.2:1b");

        for task in TaskType::builtin() {
            assert_eq!(
                select_model(&task, &assignments, &default),
                select_model(&task, &assignments, &default)
            );
        }
    }
}
