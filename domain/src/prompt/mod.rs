//! Prompt domain
//!
//! Building the text that is dispatched to a model from the task-specific
//! template and the raw content.

mod composer;

pub use composer::{ComposedPrompt, PROMPT_SEPARATOR, PromptComposer, PromptTemplates};
