//! Model identifier value object

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of an external model (Value Object)
///
/// Models are addressed by whatever name the executor understands,
/// e.g. `llama3.2:1b` or `mistral`. The identifier is opaque to the
/// pipeline; the only rule is that it is not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(String);

impl ModelId {
    /// Model used when nothing else is configured.
    pub const BASELINE: &'static str = "llama3.2:1b";

    /// Create a model identifier, trimming surrounding whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidModelId(id));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The built-in fallback model.
    pub fn baseline() -> Self {
        Self(Self::BASELINE.to_string())
    }

    /// Get the string identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::baseline()
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ModelId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ModelId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ModelId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_id_trims() {
        let model = ModelId::new("  mistral ").unwrap();
        assert_eq!(model.as_str(), "mistral");
        assert_eq!(model.to_string(), "mistral");
    }

    #[test]
    fn test_blank_model_id_rejected() {
        assert!(ModelId::new("").is_err());
        assert!(ModelId::new("   ").is_err());
        assert!("".parse::<ModelId>().is_err());
    }

    #[test]
    fn test_baseline_is_default() {
        assert_eq!(ModelId::default(), ModelId::baseline());
        assert_eq!(ModelId::baseline().as_str(), "llama3.2:1b");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let model = ModelId::new("llama3.2:1b").unwrap();
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, "\"llama3.2:1b\"");

        let parsed: ModelId = serde_json::from_str("\"mistral\"").unwrap();
        assert_eq!(parsed.as_str(), "mistral");

        assert!(serde_json::from_str::<ModelId>("\"\"").is_err());
    }
}
