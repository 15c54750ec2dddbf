//! Model executor adapters
//!
//! | Backend | Adapter | Transport |
//! |---------|---------|-----------|
//! | `ollama-cli` | [`OllamaCliExecutor`] | `ollama run <model>`, prompt on stdin |
//! | `ollama-http` | [`OllamaHttpExecutor`] | `POST /api/generate` (feature `http`) |
//! | `stub` | [`StubExecutor`] | canned text after a fixed delay |

mod ollama_cli;
#[cfg(feature = "http")]
mod ollama_http;
mod stub;

pub use ollama_cli::OllamaCliExecutor;
#[cfg(feature = "http")]
pub use ollama_http::OllamaHttpExecutor;
pub use stub::StubExecutor;

use pipeline_application::ModelExecutor;
use pipeline_domain::{ExecutorBackend, ExecutorSettings};
use std::sync::Arc;
use std::time::Duration;

/// Build the adapter named by `settings.backend`.
///
/// Without the `http` feature the HTTP backend falls back to the CLI one.
pub fn build_executor(settings: &ExecutorSettings) -> Arc<dyn ModelExecutor> {
    match settings.backend {
        ExecutorBackend::OllamaCli => Arc::new(OllamaCliExecutor::new(&settings.binary)),
        #[cfg(feature = "http")]
        ExecutorBackend::OllamaHttp => Arc::new(OllamaHttpExecutor::new(&settings.base_url)),
        #[cfg(not(feature = "http"))]
        ExecutorBackend::OllamaHttp => {
            tracing::warn!("Built without the `http` feature; using the ollama CLI instead");
            Arc::new(OllamaCliExecutor::new(&settings.binary))
        }
        ExecutorBackend::Stub => Arc::new(StubExecutor::new(Duration::from_millis(
            settings.stub_delay_ms,
        ))),
    }
}
