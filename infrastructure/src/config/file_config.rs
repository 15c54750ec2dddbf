//! Raw config file sections
//!
//! The file is parsed into untyped top-level values first, then each known
//! section is deserialized on its own. A section that fails keeps its
//! baseline value, so one typo does not discard the rest of the file.

use super::error::ConfigError;
use figment::providers::{Format, Json, Toml, Yaml};
use figment::value::{Dict, Value};
use figment::Figment;
use pipeline_domain::{ConfigIssue, ConfigIssueCode, ModelId, Settings};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Supported config file formats, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Toml,
    Json,
}

impl FileFormat {
    /// `.toml` and `.json` by extension; anything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => FileFormat::Toml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }
}

/// Top-level sections of one config file
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    path: PathBuf,
    sections: Dict,
}

impl FileConfig {
    /// Read and parse a config file.
    ///
    /// Returns `Ok(None)` if the file does not exist. An empty file yields
    /// no sections. A file that is not a key/value mapping is an error.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(path, &content, FileFormat::from_path(path)).map(Some)
    }

    /// Parse config content; `path` is only used for messages.
    pub fn parse(path: &Path, content: &str, format: FileFormat) -> Result<Self, ConfigError> {
        let sections = if content.trim().is_empty() {
            Dict::new()
        } else {
            let figment = match format {
                FileFormat::Yaml => Figment::from(Yaml::string(content)),
                FileFormat::Toml => Figment::from(Toml::string(content)),
                FileFormat::Json => Figment::from(Json::string(content)),
            };
            figment
                .extract::<Dict>()
                .map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: Box::new(source),
                })?
        };

        Ok(Self {
            path: path.to_path_buf(),
            sections,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Top-level keys present in the file
    pub fn section_keys(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Replace each section of `settings` that the file provides.
    pub fn apply(&self, settings: &mut Settings) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (key, value) in &self.sections {
            match key.as_str() {
                "models" => {
                    let has_default = value
                        .as_dict()
                        .is_some_and(|roles| roles.contains_key("default"));
                    if !has_default {
                        issues.push(ConfigIssue::warning(
                            ConfigIssueCode::MissingDefaultModel,
                            format!(
                                "models: no default model, using {}",
                                ModelId::BASELINE
                            ),
                        ));
                    }
                    replace_section(&mut settings.models, key, value, &mut issues)
                }
                "model_assignments" => {
                    replace_section(&mut settings.model_assignments, key, value, &mut issues)
                }
                "prompts" => replace_section(&mut settings.prompts, key, value, &mut issues),
                "thresholds" => {
                    replace_section(&mut settings.thresholds, key, value, &mut issues)
                }
                "executor" => replace_section(&mut settings.executor, key, value, &mut issues),
                other => issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownSection {
                        section: other.to_string(),
                    },
                    format!("{}: unknown top-level key, ignored", other),
                )),
            }
        }

        issues
    }
}

fn replace_section<T: DeserializeOwned>(
    slot: &mut T,
    key: &str,
    value: &Value,
    issues: &mut Vec<ConfigIssue>,
) {
    match value.deserialize::<T>() {
        Ok(section) => *slot = section,
        Err(e) => issues.push(ConfigIssue::warning(
            ConfigIssueCode::InvalidSection {
                section: key.to_string(),
            },
            format!("{}: {}; keeping built-in defaults for this section", key, e),
        )),
    }
}
