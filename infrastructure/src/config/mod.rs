//! Settings loading for ollama-pipeline
//!
//! Settings are assembled from three layers, lowest to highest priority:
//!
//! 1. Built-in baseline ([`Settings::baseline`](pipeline_domain::Settings::baseline))
//! 2. One config file (YAML, TOML or JSON): `--config <path>`, else
//!    `./config.yaml`, else `$XDG_CONFIG_HOME/ollama-pipeline/config.yaml`.
//!    Each top-level key present replaces the whole baseline section.
//! 3. Environment: `OLLAMA_MODEL`, `OLLAMA_TIMEOUT`

mod env_overrides;
mod error;
mod file_config;
mod loader;

pub use env_overrides::EnvOverrides;
pub use error::ConfigError;
pub use file_config::{FileConfig, FileFormat};
pub use loader::{ConfigSource, LoadedSettings, SettingsLoader};
