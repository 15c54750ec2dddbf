//! Ollama CLI executor
//!
//! Runs `<binary> run <model>` once per request, writes the prompt to the
//! child's stdin and returns its stdout.

use async_trait::async_trait;
use pipeline_application::{ExecutionError, ModelExecutor, ModelRequest};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct OllamaCliExecutor {
    binary: String,
}

impl OllamaCliExecutor {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn resolve_binary(&self, request: &ModelRequest) -> Result<PathBuf, ExecutionError> {
        which::which(&self.binary).map_err(|e| ExecutionError::Unavailable {
            model: request.model.clone(),
            message: format!("'{}' not found: {}", self.binary, e),
        })
    }

    async fn run(&self, request: &ModelRequest) -> Result<String, ExecutionError> {
        let binary = self.resolve_binary(request)?;
        debug!("Running {} run {}", binary.display(), request.model);

        let mut child = Command::new(&binary)
            .arg("run")
            .arg(request.model.as_str())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExecutionError::Unavailable {
                model: request.model.clone(),
                message: format!("failed to start {}: {}", binary.display(), e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A child that exits without reading its input reports through its status
            if let Err(e) = stdin.write_all(request.prompt.as_bytes()).await {
                warn!("Failed to write prompt to {}: {}", binary.display(), e);
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ExecutionError::Failed {
                model: request.model.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.trim();
            return Err(ExecutionError::Failed {
                model: request.model.clone(),
                message: if detail.is_empty() {
                    output.status.to_string()
                } else {
                    format!("{}: {}", output.status, detail)
                },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}

impl Default for OllamaCliExecutor {
    fn default() -> Self {
        Self::new("ollama")
    }
}

#[async_trait]
impl ModelExecutor for OllamaCliExecutor {
    async fn execute(&self, request: &ModelRequest) -> Result<String, ExecutionError> {
        // Dropping the run future kills the child (kill_on_drop)
        match tokio::time::timeout(request.timeout, self.run(request)).await {
            Ok(result) => result,
            Err(_) => Err(ExecutionError::Timeout {
                model: request.model.clone(),
                seconds: request.timeout.as_secs(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "ollama-cli"
    }
}
