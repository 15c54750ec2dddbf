//! Analyze Content use case
//!
//! Routes one piece of content through the pipeline:
//! classify → select model → compose prompt → dispatch → persist.

use crate::ports::model_executor::{ExecutionError, ModelExecutor, ModelRequest};
use crate::ports::progress::{AnalysisProgressNotifier, NoProgress};
use crate::ports::result_store::{PersistenceError, ResultStore};
use chrono::Utc;
use pipeline_domain::util::log_preview;
use pipeline_domain::{
    AnalysisResult, ComposedPrompt, DomainError, HeuristicClassifier, ModelId, PromptComposer,
    Settings, TaskClassifier, TaskType,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during an analysis run
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// Reserved for classifiers that can reject their input
    #[error("Classification failed: {0}")]
    Classification(#[source] DomainError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// The model answered but the record could not be written.
    /// The computed result is kept so the caller can still use it.
    #[error("Analysis completed but the result could not be saved: {source}")]
    Persistence {
        #[source]
        source: PersistenceError,
        result: Box<AnalysisResult>,
    },
}

impl AnalyzeError {
    /// The result that was computed but not persisted, if any
    pub fn unsaved_result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalyzeError::Persistence { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The model involved in the failure, if known
    pub fn model(&self) -> Option<&ModelId> {
        match self {
            AnalyzeError::Execution(e) => Some(e.model()),
            AnalyzeError::Persistence { result, .. } => Some(result.model()),
            AnalyzeError::Classification(_) => None,
        }
    }
}

/// Outcome of routing, before anything is dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    pub task: TaskType,
    pub model: ModelId,
    pub prompt: ComposedPrompt,
}

/// Classify `content`, select its model and compose the prompt.
///
/// Pure apart from logging; nothing is dispatched or stored.
pub fn route_content(
    classifier: &dyn TaskClassifier,
    content: &str,
    settings: &Settings,
) -> RoutingDecision {
    let task = classifier.classify(content);
    debug!("Classified task as '{}'", task);

    let model = settings.model_for(&task).clone();
    debug!("Selected model '{}' for task '{}'", model, task);

    let prompt = PromptComposer::compose(&task, &settings.prompts, content);
    if prompt.used_template_fallback() {
        debug!(
            "No prompt template for '{}'; content is reused as the template",
            task
        );
    }

    RoutingDecision {
        task,
        model,
        prompt,
    }
}

/// Use case for analyzing a single piece of content.
///
/// Runs request-at-a-time: one call fully completes (including persistence)
/// before it returns. The model call is bounded by
/// `thresholds.max_response_time`.
pub struct AnalyzeContentUseCase {
    executor: Arc<dyn ModelExecutor>,
    store: Arc<dyn ResultStore>,
    classifier: Arc<dyn TaskClassifier>,
}

impl Clone for AnalyzeContentUseCase {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            store: self.store.clone(),
            classifier: self.classifier.clone(),
        }
    }
}

impl AnalyzeContentUseCase {
    pub fn new(executor: Arc<dyn ModelExecutor>, store: Arc<dyn ResultStore>) -> Self {
        Self {
            executor,
            store,
            classifier: Arc::new(HeuristicClassifier::new()),
        }
    }

    /// Replace the classification strategy.
    pub fn with_classifier(mut self, classifier: Arc<dyn TaskClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Classify, select a model and compose the prompt without dispatching.
    pub fn route(&self, content: &str, settings: &Settings) -> RoutingDecision {
        route_content(self.classifier.as_ref(), content, settings)
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        content: &str,
        settings: &Settings,
    ) -> Result<AnalysisResult, AnalyzeError> {
        self.execute_with_progress(content, settings, &NoProgress)
            .await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        content: &str,
        settings: &Settings,
        progress: &dyn AnalysisProgressNotifier,
    ) -> Result<AnalysisResult, AnalyzeError> {
        info!(
            "Starting analysis ({} chars): {}",
            content.chars().count(),
            log_preview(content, 60)
        );

        let RoutingDecision {
            task,
            model,
            prompt,
        } = self.route(content, settings);
        progress.on_task_classified(&task);
        progress.on_model_selected(&task, &model);

        let request = ModelRequest::new(model, prompt.into_text(), settings.response_timeout());

        progress.on_dispatch_start(&request.model);
        let output = match self.dispatch(&request).await {
            Ok(output) => {
                progress.on_dispatch_complete(&request.model, true);
                output
            }
            Err(e) => {
                warn!("Model query failed: {}", e);
                progress.on_dispatch_complete(&request.model, false);
                return Err(e.into());
            }
        };

        let min_len = settings.thresholds.min_response_length;
        let output_len = output.chars().count();
        if output_len < min_len {
            warn!(
                "Response from '{}' is {} chars, below min_response_length {}",
                request.model, output_len, min_len
            );
        }

        let result = AnalysisResult::new(task, request.model, output, Utc::now());

        match self.store.persist(&result) {
            Ok(location) => {
                info!("Saved results to {}", location);
                progress.on_result_persisted(&location);
                Ok(result)
            }
            Err(source) => {
                warn!("Failed to persist analysis result: {}", source);
                Err(AnalyzeError::Persistence {
                    source,
                    result: Box::new(result),
                })
            }
        }
    }

    /// Run the model call, bounded by the request timeout
    async fn dispatch(&self, request: &ModelRequest) -> Result<String, ExecutionError> {
        debug!(
            "Dispatching to '{}' via {} (timeout {}s)",
            request.model,
            self.executor.name(),
            request.timeout.as_secs()
        );

        match tokio::time::timeout(request.timeout, self.executor.execute(request)).await {
            Ok(result) => result,
            Err(_) => Err(request.timeout_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::result_store::StoredLocation;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    // === Mock implementations ===

    enum Script {
        Reply(String),
        Fail(String),
        Hang,
    }

    struct ScriptedExecutor {
        script: Script,
        requests: Mutex<Vec<ModelRequest>>,
    }

    impl ScriptedExecutor {
        fn replying(text: &str) -> Self {
            Self::new(Script::Reply(text.to_string()))
        }

        fn new(script: Script) -> Self {
            Self {
                script,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<ModelRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelExecutor for ScriptedExecutor {
        async fn execute(&self, request: &ModelRequest) -> Result<String, ExecutionError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.script {
                Script::Reply(text) => Ok(text.clone()),
                Script::Fail(message) => Err(ExecutionError::Failed {
                    model: request.model.clone(),
                    message: message.clone(),
                }),
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok("too late".to_string())
                }
            }
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<Vec<AnalysisResult>>,
        fail: bool,
    }

    impl MemoryStore {
        fn failing() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn saved(&self) -> Vec<AnalysisResult> {
            self.saved.lock().unwrap().clone()
        }
    }

    impl ResultStore for MemoryStore {
        fn persist(&self, result: &AnalysisResult) -> Result<StoredLocation, PersistenceError> {
            if self.fail {
                return Err(PersistenceError::Io {
                    location: "memory".to_string(),
                    source: std::io::Error::other("disk full"),
                });
            }
            let mut saved = self.saved.lock().unwrap();
            saved.push(result.clone());
            Ok(StoredLocation::new(format!("memory/{}", saved.len())))
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl AnalysisProgressNotifier for RecordingProgress {
        fn on_task_classified(&self, task: &TaskType) {
            self.events.lock().unwrap().push(format!("classified:{task}"));
        }

        fn on_model_selected(&self, _task: &TaskType, model: &ModelId) {
            self.events.lock().unwrap().push(format!("selected:{model}"));
        }

        fn on_dispatch_start(&self, model: &ModelId) {
            self.events.lock().unwrap().push(format!("start:{model}"));
        }

        fn on_dispatch_complete(&self, _model: &ModelId, success: bool) {
            self.events.lock().unwrap().push(format!("complete:{success}"));
        }

        fn on_result_persisted(&self, location: &StoredLocation) {
            self.events.lock().unwrap().push(format!("persisted:{location}"));
        }
    }

    fn setup(executor: ScriptedExecutor) -> (AnalyzeContentUseCase, Arc<ScriptedExecutor>, Arc<MemoryStore>) {
        setup_with_store(executor, MemoryStore::default())
    }

    fn setup_with_store(
        executor: ScriptedExecutor,
        store: MemoryStore,
    ) -> (AnalyzeContentUseCase, Arc<ScriptedExecutor>, Arc<MemoryStore>) {
        let executor = Arc::new(executor);
        let store = Arc::new(store);
        let use_case = AnalyzeContentUseCase::new(executor.clone(), store.clone());
        (use_case, executor, store)
    }

    fn model(name: &str) -> ModelId {
        ModelId::new(name).unwrap()
    }

    // === Routing scenarios ===

    #[tokio::test]
    async fn test_function_definition_goes_to_default_model() {
        let (use_case, executor, store) = setup(ScriptedExecutor::replying("looks fine"));

        let result = use_case
            .execute("def foo(): pass", &Settings::baseline())
            .await
            .unwrap();

        assert_eq!(result.task_type(), &TaskType::CodeReview);
        assert_eq!(result.model(), &model("llama3.2:1b"));
        assert_eq!(result.output(), "looks fine");
        assert_eq!(executor.requests()[0].model, model("llama3.2:1b"));
        assert_eq!(store.saved(), vec![result]);
    }

    #[tokio::test]
    async fn test_bug_report_uses_assignment() {
        let (use_case, executor, _store) = setup(ScriptedExecutor::replying("root cause"));
        let settings =
            Settings::baseline().with_assignment(TaskType::BugAnalysis, model("mistral"));

        let result = use_case
            .execute("There is a bug in the login flow", &settings)
            .await
            .unwrap();

        assert_eq!(result.task_type(), &TaskType::BugAnalysis);
        assert_eq!(result.model(), &model("mistral"));
        assert_eq!(executor.requests()[0].model, model("mistral"));
    }

    #[tokio::test]
    async fn test_missing_template_sends_content_twice() {
        let (use_case, executor, _store) = setup(ScriptedExecutor::replying("docs"));
        let content = "Please write docs for this API";

        let result = use_case.execute(content, &Settings::baseline()).await.unwrap();

        assert_eq!(result.task_type(), &TaskType::Documentation);
        assert_eq!(
            executor.requests()[0].prompt,
            "Please write docs for this API\n\nPlease write docs for this API"
        );
    }

    #[tokio::test]
    async fn test_configured_template_prefixes_content() {
        let (use_case, executor, _store) = setup(ScriptedExecutor::replying("ok"));
        let settings = Settings::baseline()
            .with_prompt(TaskType::CodeReview, "Review this code for correctness.");

        use_case.execute("class A: pass", &settings).await.unwrap();

        assert_eq!(
            executor.requests()[0].prompt,
            "Review this code for correctness.\n\nclass A: pass"
        );
    }

    #[tokio::test]
    async fn test_request_carries_configured_timeout() {
        let (use_case, executor, _store) = setup(ScriptedExecutor::replying("ok"));
        let settings = Settings::baseline().with_max_response_time(15);

        use_case.execute("notes", &settings).await.unwrap();

        assert_eq!(executor.requests()[0].timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_route_is_idempotent() {
        let (use_case, executor, _store) = setup(ScriptedExecutor::replying("unused"));
        let settings =
            Settings::baseline().with_assignment(TaskType::BugAnalysis, model("mistral"));

        let first = use_case.route("error: index out of range", &settings);
        let second = use_case.route("error: index out of range", &settings);

        assert_eq!(first, second);
        assert_eq!(first.task, TaskType::BugAnalysis);
        assert!(executor.requests().is_empty());
    }

    #[test]
    fn test_route_content_with_template() {
        let settings = Settings::baseline()
            .with_assignment(TaskType::CodeReview, model("qwen2.5-coder:7b"))
            .with_prompt(TaskType::CodeReview, "Review this code:");

        let decision = route_content(
            &HeuristicClassifier::new(),
            "class Cache:\n    pass",
            &settings,
        );

        assert_eq!(decision.task, TaskType::CodeReview);
        assert_eq!(decision.model.as_str(), "qwen2.5-coder:7b");
        assert_eq!(
            decision.prompt.text(),
            "Review this code:\n\nclass Cache:\n    pass"
        );
        assert!(!decision.prompt.used_template_fallback());
    }

    #[tokio::test]
    async fn test_custom_classifier() {
        struct AlwaysAudit;
        impl TaskClassifier for AlwaysAudit {
            fn classify(&self, _content: &str) -> TaskType {
                TaskType::Other("security_audit".to_string())
            }
        }

        let (use_case, executor, _store) = setup(ScriptedExecutor::replying("ok"));
        let use_case = use_case.with_classifier(Arc::new(AlwaysAudit));

        let result = use_case.execute("def foo(): pass", &Settings::baseline()).await.unwrap();

        assert_eq!(result.task_type().as_str(), "security_audit");
        assert_eq!(result.model(), &model("llama3.2:1b"));
        assert_eq!(executor.requests()[0].prompt, "def foo(): pass\n\ndef foo(): pass");
    }

    // === Failure handling ===

    #[tokio::test]
    async fn test_executor_failure_is_propagated_with_model() {
        let (use_case, _executor, store) =
            setup(ScriptedExecutor::new(Script::Fail("model not found".to_string())));

        let err = use_case
            .execute("def foo(): pass", &Settings::baseline())
            .await
            .unwrap_err();

        assert!(matches!(err, AnalyzeError::Execution(ExecutionError::Failed { .. })));
        assert_eq!(err.model(), Some(&model("llama3.2:1b")));
        assert!(store.saved().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_model_times_out() {
        let (use_case, _executor, store) = setup(ScriptedExecutor::new(Script::Hang));
        let settings = Settings::baseline().with_max_response_time(2);

        let err = use_case.execute("hello", &settings).await.unwrap_err();

        match err {
            AnalyzeError::Execution(e) => {
                assert!(e.is_timeout());
                assert_eq!(e.to_string(), "Model 'llama3.2:1b' did not respond within 2s");
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_result() {
        let (use_case, _executor, _store) =
            setup_with_store(ScriptedExecutor::replying("answer"), MemoryStore::failing());

        let err = use_case
            .execute("def foo(): pass", &Settings::baseline())
            .await
            .unwrap_err();

        assert!(matches!(err, AnalyzeError::Persistence { .. }));
        let unsaved = err.unsaved_result().unwrap();
        assert_eq!(unsaved.output(), "answer");
        assert_eq!(unsaved.task_type(), &TaskType::CodeReview);
    }

    #[tokio::test]
    async fn test_short_response_is_not_fatal() {
        let (use_case, _executor, store) = setup(ScriptedExecutor::replying("ok"));
        let mut settings = Settings::baseline();
        settings.thresholds.min_response_length = 100;

        let result = use_case.execute("notes", &settings).await.unwrap();

        assert_eq!(result.output(), "ok");
        assert_eq!(store.saved().len(), 1);
    }

    // === Progress ===

    #[tokio::test]
    async fn test_progress_events_in_order() {
        let (use_case, _executor, _store) = setup(ScriptedExecutor::replying("ok"));
        let progress = RecordingProgress::default();

        use_case
            .execute_with_progress("def foo(): pass", &Settings::baseline(), &progress)
            .await
            .unwrap();

        assert_eq!(
            *progress.events.lock().unwrap(),
            vec![
                "classified:code_review",
                "selected:llama3.2:1b",
                "start:llama3.2:1b",
                "complete:true",
                "persisted:memory/1",
            ]
        );
    }

    #[tokio::test]
    async fn test_progress_reports_failed_dispatch() {
        let (use_case, _executor, _store) =
            setup(ScriptedExecutor::new(Script::Fail("boom".to_string())));
        let progress = RecordingProgress::default();

        let _ = use_case
            .execute_with_progress("hello", &Settings::baseline(), &progress)
            .await;

        let events = progress.events.lock().unwrap();
        assert_eq!(events.last().map(String::as_str), Some("complete:false"));
    }
}
