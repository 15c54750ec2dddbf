//! Layered settings loader

use super::env_overrides::EnvOverrides;
use super::error::ConfigError;
use super::file_config::FileConfig;
use pipeline_domain::{ConfigIssue, Settings};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name searched in the working directory and the user config dir
pub const CONFIG_FILE_NAME: &str = "config.yaml";
const APP_DIR: &str = "ollama-pipeline";

/// Where a part of the merged settings came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Baseline,
    File(PathBuf),
    Environment(&'static str),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Baseline => write!(f, "built-in defaults"),
            ConfigSource::File(path) => write!(f, "file {}", path.display()),
            ConfigSource::Environment(var) => write!(f, "environment {}", var),
        }
    }
}

/// Result of [`SettingsLoader::load`]
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub issues: Vec<ConfigIssue>,
    /// Layers that contributed, lowest priority first
    pub sources: Vec<ConfigSource>,
}

impl LoadedSettings {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(ConfigIssue::is_error)
    }
}

/// Builds [`Settings`] from baseline, config file and environment.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    config_path: Option<PathBuf>,
    use_file: bool,
    use_env: bool,
    env: Option<EnvOverrides>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            use_file: true,
            use_env: true,
            env: None,
        }
    }

    /// Use this file instead of the discovered one
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Skip the config file layer (`--no-config`)
    pub fn without_file(mut self) -> Self {
        self.use_file = false;
        self
    }

    /// Skip the environment layer
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Use these overrides instead of reading the process environment
    pub fn with_env_overrides(mut self, overrides: EnvOverrides) -> Self {
        self.env = Some(overrides);
        self
    }

    /// Load and validate settings.
    ///
    /// An explicit `--config` path that does not exist is an error; a
    /// missing discovered file is not.
    pub fn load(&self) -> Result<LoadedSettings, ConfigError> {
        let mut settings = Settings::baseline();
        let mut issues = Vec::new();
        let mut sources = vec![ConfigSource::Baseline];

        if self.use_file {
            if let Some(path) = self.resolve_config_path() {
                match FileConfig::read(&path)? {
                    Some(file) => {
                        info!("Loading config from {}", path.display());
                        issues.extend(file.apply(&mut settings));
                        sources.push(ConfigSource::File(path));
                    }
                    None if self.config_path.is_some() => {
                        return Err(ConfigError::Read {
                            path,
                            source: std::io::Error::from(std::io::ErrorKind::NotFound),
                        });
                    }
                    None => {}
                }
            } else {
                debug!("No config file found, using built-in defaults");
            }
        }

        if self.use_env {
            let overrides = match &self.env {
                Some(overrides) => overrides.clone(),
                None => EnvOverrides::from_env()?,
            };
            overrides.apply(&mut settings);
            for var in overrides.applied_vars() {
                debug!("Applied environment override {}", var);
                sources.push(ConfigSource::Environment(var));
            }
        }

        issues.extend(settings.validate());

        Ok(LoadedSettings {
            settings,
            issues,
            sources,
        })
    }

    /// The config file that [`load`](Self::load) would read
    pub fn resolve_config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_path {
            return Some(path.clone());
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }

        Self::global_config_path().filter(|path| path.exists())
    }

    /// `$XDG_CONFIG_HOME/ollama-pipeline/config.yaml` or the platform equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE_NAME))
    }

    pub fn explicit_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
