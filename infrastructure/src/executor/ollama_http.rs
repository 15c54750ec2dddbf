//! Ollama HTTP executor (`POST /api/generate`, non-streaming)

use async_trait::async_trait;
use pipeline_application::{ExecutionError, ModelExecutor, ModelRequest};
use pipeline_domain::ModelId;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OllamaHttpExecutor {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaHttpExecutor {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }

    fn map_transport_error(request: &ModelRequest, e: reqwest::Error) -> ExecutionError {
        if e.is_timeout() {
            ExecutionError::Timeout {
                model: request.model.clone(),
                seconds: request.timeout.as_secs(),
            }
        } else if e.is_connect() {
            ExecutionError::Unavailable {
                model: request.model.clone(),
                message: e.to_string(),
            }
        } else {
            ExecutionError::Failed {
                model: request.model.clone(),
                message: e.to_string(),
            }
        }
    }
}

/// Turn a `/api/generate` reply into response text or an error
pub(crate) fn parse_generate_reply(
    model: &ModelId,
    status: u16,
    body: &str,
) -> Result<String, ExecutionError> {
    let parsed: Option<GenerateResponse> = serde_json::from_str(body).ok();

    if let Some(message) = parsed.as_ref().and_then(|r| r.error.clone()) {
        return Err(if status == 404 {
            ExecutionError::Unavailable {
                model: model.clone(),
                message,
            }
        } else {
            ExecutionError::Failed {
                model: model.clone(),
                message,
            }
        });
    }

    if !(200..300).contains(&status) {
        return Err(ExecutionError::Failed {
            model: model.clone(),
            message: format!("HTTP {}", status),
        });
    }

    parsed
        .map(|r| r.response)
        .ok_or_else(|| ExecutionError::Failed {
            model: model.clone(),
            message: "malformed response from Ollama".to_string(),
        })
}

#[async_trait]
impl ModelExecutor for OllamaHttpExecutor {
    async fn execute(&self, request: &ModelRequest) -> Result<String, ExecutionError> {
        let url = self.endpoint();
        debug!("POST {} (model {})", url, request.model);

        let body = GenerateRequest {
            model: request.model.as_str(),
            prompt: &request.prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(request, e))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| Self::map_transport_error(request, e))?;

        parse_generate_reply(&request.model, status, &text)
    }

    fn name(&self) -> &'static str {
        "ollama-http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn model() -> ModelId {
        ModelId::new("mistral").unwrap()
    }

    #[test]
    fn test_endpoint_joins_path() {
        assert_eq!(
            OllamaHttpExecutor::new("http://localhost:11434/").endpoint(),
            "http://localhost:11434/api/generate"
        );
    }

    #[test]
    fn test_request_body_is_non_streaming() {
        let body = GenerateRequest {
            model: "mistral",
            prompt: "hi",
            stream: false,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"model": "mistral", "prompt": "hi", "stream": false})
        );
    }

    #[test]
    fn test_parse_success() {
        let body = r#"{"model":"mistral","response":"Looks fine.","done":true}"#;
        assert_eq!(parse_generate_reply(&model(), 200, body).unwrap(), "Looks fine.");
    }

    #[test]
    fn test_parse_missing_model() {
        let body = r#"{"error":"model 'mistral' not found"}"#;
        let err = parse_generate_reply(&model(), 404, body).unwrap_err();
        assert!(matches!(err, ExecutionError::Unavailable { .. }));
    }

    #[test]
    fn test_parse_server_error() {
        let err = parse_generate_reply(&model(), 500, "oops").unwrap_err();
        assert_eq!(err.to_string(), "Model 'mistral' failed: HTTP 500");
    }

    #[test]
    fn test_parse_malformed_body() {
        let err = parse_generate_reply(&model(), 200, "<html>").unwrap_err();
        assert!(matches!(err, ExecutionError::Failed { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unavailable() {
        // Nothing listens on the discard port
        let executor = OllamaHttpExecutor::new("http://127.0.0.1:9");
        let request = ModelRequest::new(model(), "hi", Duration::from_secs(5));

        let err = executor.execute(&request).await.unwrap_err();
        assert!(matches!(err, ExecutionError::Unavailable { .. }));
    }
}
