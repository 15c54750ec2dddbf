//! Prompt composition for a single analysis run

use crate::task::task_type::TaskType;
use std::collections::BTreeMap;

/// Task type → prompt template (`prompts` in config)
pub type PromptTemplates = BTreeMap<TaskType, String>;

/// Separator between the template and the content
pub const PROMPT_SEPARATOR: &str = "\n\n";

/// A prompt ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    text: String,
    template_fallback: bool,
}

impl ComposedPrompt {
    /// The full prompt text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume and return the prompt text
    pub fn into_text(self) -> String {
        self.text
    }

    /// True when no template was configured and the content stood in for it.
    ///
    /// In that case the content appears twice in [`text`](Self::text).
    pub fn used_template_fallback(&self) -> bool {
        self.template_fallback
    }
}

/// Composes `template + "\n\n" + content`
pub struct PromptComposer;

impl PromptComposer {
    /// Compose the prompt for `task`.
    ///
    /// When `templates` has no entry for the task, the raw content is used
    /// as the template, so the content is repeated:
    /// `content + "\n\n" + content`. Callers that want a different policy
    /// should configure a template for every task type they route.
    pub fn compose(task: &TaskType, templates: &PromptTemplates, content: &str) -> ComposedPrompt {
        let (template, template_fallback) = match templates.get(task) {
            Some(template) => (template.as_str(), false),
            None => (content, true),
        };

        ComposedPrompt {
            text: format!("{}{}{}", template, PROMPT_SEPARATOR, content),
            template_fallback,
        }
    }
}
