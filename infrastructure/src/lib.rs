//! Infrastructure layer for ollama-pipeline
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus layered settings loading.

pub mod config;
pub mod executor;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigError, ConfigSource, EnvOverrides, FileConfig, LoadedSettings, SettingsLoader};
#[cfg(feature = "http")]
pub use executor::OllamaHttpExecutor;
pub use executor::{OllamaCliExecutor, StubExecutor, build_executor};
pub use storage::{FsResultStore, FsSummarySource, RunDirectoryManager};
