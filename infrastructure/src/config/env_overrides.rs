//! Environment variable overrides

use super::error::ConfigError;
use pipeline_domain::{ModelId, Settings};

/// Replaces `models.default`
pub const MODEL_VAR: &str = "OLLAMA_MODEL";
/// Replaces `thresholds.max_response_time` (seconds)
pub const TIMEOUT_VAR: &str = "OLLAMA_TIMEOUT";

/// Overrides read from the process environment.
///
/// Unset and blank variables are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub model: Option<ModelId>,
    pub timeout_secs: Option<u64>,
}

impl EnvOverrides {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build overrides from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        // ModelId::new only fails on blank input, which `present` filters out
        let model = present(MODEL_VAR).and_then(|v| ModelId::new(v).ok());

        let timeout_secs = match present(TIMEOUT_VAR) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::Environment {
                    name: TIMEOUT_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            model,
            timeout_secs,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_none() && self.timeout_secs.is_none()
    }

    /// Names of the variables that took effect
    pub fn applied_vars(&self) -> Vec<&'static str> {
        let mut vars = Vec::new();
        if self.model.is_some() {
            vars.push(MODEL_VAR);
        }
        if self.timeout_secs.is_some() {
            vars.push(TIMEOUT_VAR);
        }
        vars
    }

    pub fn apply(&self, settings: &mut Settings) {
        if let Some(model) = &self.model {
            settings.models.default = model.clone();
        }
        if let Some(secs) = self.timeout_secs {
            settings.thresholds.max_response_time = secs;
        }
    }
}
