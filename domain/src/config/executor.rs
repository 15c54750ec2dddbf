//! Executor selection settings (`executor` section)

use serde::{Deserialize, Serialize};

/// Which adapter runs model queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutorBackend {
    /// `ollama run <model>` subprocess
    #[default]
    OllamaCli,
    /// Ollama REST API (`/api/generate`)
    OllamaHttp,
    /// Canned responses, no model involved
    Stub,
}

impl ExecutorBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutorBackend::OllamaCli => "ollama-cli",
            ExecutorBackend::OllamaHttp => "ollama-http",
            ExecutorBackend::Stub => "stub",
        }
    }
}

impl std::fmt::Display for ExecutorBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Executor settings
///
/// # Example
///
/// ```yaml
/// executor:
///   backend: ollama-http
///   base_url: http://gpu-box:11434
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorSettings {
    pub backend: ExecutorBackend,
    /// Ollama binary for the CLI backend
    pub binary: String,
    /// Server address for the HTTP backend
    pub base_url: String,
    /// Simulated latency for the stub backend
    pub stub_delay_ms: u64,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            backend: ExecutorBackend::default(),
            binary: "ollama".to_string(),
            base_url: "http://localhost:11434".to_string(),
            stub_delay_ms: 500,
        }
    }
}
