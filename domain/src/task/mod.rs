//! Task routing domain
//!
//! Deciding what kind of analysis a piece of content needs and which model
//! should handle it:
//!
//! - [`task_type::TaskType`]: the label attached to every run
//! - [`classifier::TaskClassifier`]: strategy that labels content
//! - [`selection::select_model`]: task type → model identifier policy

pub mod classifier;
pub mod selection;
pub mod task_type;
