//! Domain layer for ollama-pipeline
//!
//! This crate contains the routing policies, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Routing
//!
//! Every piece of content is labelled with a [`TaskType`] by a
//! [`TaskClassifier`], and the label picks a [`ModelId`] through the
//! `model_assignments` table in [`Settings`], falling back to the default
//! model.
//!
//! ## Runs
//!
//! One dispatch produces one [`AnalysisResult`]; its [`PersistedSummary`]
//! feeds the historical report ([`RunStatistics`], [`MarkdownReport`]).

pub mod analysis;
pub mod config;
pub mod core;
pub mod prompt;
pub mod report;
pub mod task;
pub mod util;

// Re-export commonly used types
pub use analysis::AnalysisResult;
pub use config::{
    ConfigIssue, ConfigIssueCode, ExecutorBackend, ExecutorSettings, ModelRoles, SectionInfo,
    Settings, Severity, Thresholds, known_sections, lookup_section,
};
pub use core::{error::DomainError, model::ModelId};
pub use prompt::{ComposedPrompt, PromptComposer, PromptTemplates};
pub use report::{MarkdownReport, PersistedSummary, RunStatistics, UsageCount};
pub use task::{
    classifier::{HeuristicClassifier, TaskClassifier},
    selection::{TaskModelMap, select_model},
    task_type::TaskType,
};
