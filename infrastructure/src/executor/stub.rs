//! Stub executor: canned responses for dry runs and tests

use async_trait::async_trait;
use pipeline_application::{ExecutionError, ModelExecutor, ModelRequest};
use pipeline_domain::util::prefix_chars;
use std::time::Duration;
use tracing::debug;

/// Prompt characters echoed back in the canned response
const ECHO_LEN: usize = 60;

/// Returns `Mock response from <model> for prompt: <first 60 chars>...`
/// after a fixed delay. Never fails.
#[derive(Debug, Clone)]
pub struct StubExecutor {
    delay: Duration,
}

impl StubExecutor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No simulated latency
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn response_for(request: &ModelRequest) -> String {
        format!(
            "Mock response from {} for prompt: {}...",
            request.model,
            prefix_chars(&request.prompt, ECHO_LEN)
        )
    }
}

#[async_trait]
impl ModelExecutor for StubExecutor {
    async fn execute(&self, request: &ModelRequest) -> Result<String, ExecutionError> {
        debug!("Stub executor answering for {}", request.model);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Self::response_for(request))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_domain::ModelId;

    fn request(prompt: &str) -> ModelRequest {
        ModelRequest::new(
            ModelId::new("llama3.2:1b").unwrap(),
            prompt,
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn test_short_prompt_is_echoed_whole() {
        let output = StubExecutor::instant()
            .execute(&request("Explain this."))
            .await
            .unwrap();
        assert_eq!(
            output,
            "Mock response from llama3.2:1b for prompt: Explain this...."
        );
    }

    #[tokio::test]
    async fn test_long_prompt_is_cut() {
        let prompt = "x".repeat(200);
        let output = StubExecutor::instant().execute(&request(&prompt)).await.unwrap();
        assert!(output.ends_with(&format!("{}...", "x".repeat(60))));
        assert!(!output.contains(&"x".repeat(61)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_applied() {
        let start = tokio::time::Instant::now();
        StubExecutor::new(Duration::from_millis(500))
            .execute(&request("hi"))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
    }
}
