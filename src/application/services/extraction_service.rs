//! Extraction Service - Runs scene extraction over a whole book
//!
//! For every chapter this service:
//!
//! - Builds the instruction contract and the capped chapter message
//! - Calls the model with a per-attempt timeout and bounded backoff retry
//! - Validates and repairs the payload, re-prompting on low coverage if configured
//!
//! Chapters may be extracted concurrently, but results are collected in
//! document order and numbered in one pass afterwards.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use tokio_retry2::strategy::{jitter, ExponentialBackoff};
use tokio_retry2::{Retry, RetryError};

use crate::application::ports::outbound::{
    ChatMessage, DocumentRendererPort, LlmPort, LlmRequest, RenderedDocuments, RetryableError,
};
use crate::application::services::llm::prompt_builder::{
    build_chapter_message, build_extraction_instructions,
};
use crate::application::services::scene_validator::SceneValidator;
use crate::application::services::sequencer::sequence;
use crate::domain::entities::{ChapterError, ChapterResult, CoverageWarning, SequencedScene};
use crate::domain::value_objects::{ExtractionSettings, RunId};

/// Transport-level knobs for model calls
#[derive(Debug, Clone)]
pub struct ExtractionServiceConfig {
    /// Timeout for a single model call
    pub request_timeout: Duration,
    /// Retries after the first attempt for transient failures
    pub max_retries: usize,
    /// Delay before the first retry; each later delay doubles (plus jitter)
    pub retry_initial_backoff: Duration,
    /// Chapters extracted at the same time
    pub concurrency: usize,
}

impl Default for ExtractionServiceConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(180),
            max_retries: 3,
            retry_initial_backoff: Duration::from_millis(2000),
            concurrency: 2,
        }
    }
}

/// Summary of one chapter, kept after its scenes move into the sequence
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterSummary {
    pub chapter_index: usize,
    pub scene_count: usize,
    pub error: Option<ChapterError>,
    pub coverage_warning: Option<CoverageWarning>,
    pub duplicate_triggers: Vec<String>,
}

impl From<&ChapterResult> for ChapterSummary {
    fn from(result: &ChapterResult) -> Self {
        Self {
            chapter_index: result.chapter_index,
            scene_count: result.scene_count(),
            error: result.error.clone(),
            coverage_warning: result.coverage_warning,
            duplicate_triggers: result.duplicate_triggers.clone(),
        }
    }
}

/// Overall result of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// At least one scene was produced
    ScenesGenerated { total: usize },
    /// Nothing was produced and at least one chapter failed
    NoScenesWithErrors { failed_chapters: usize },
    /// Nothing was produced and nothing failed; a scene-free book is suspicious
    NoScenesDetected,
}

impl RunOutcome {
    pub fn classify(total_scenes: usize, failed_chapters: usize) -> Self {
        match (total_scenes, failed_chapters) {
            (0, 0) => Self::NoScenesDetected,
            (0, failed_chapters) => Self::NoScenesWithErrors { failed_chapters },
            (total, _) => Self::ScenesGenerated { total },
        }
    }
}

/// A completed extraction run
#[derive(Debug, Clone)]
pub struct ExtractionRun {
    pub run_id: RunId,
    pub book_title: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub chapters: Vec<ChapterSummary>,
    pub scenes: Vec<SequencedScene>,
    pub documents: RenderedDocuments,
    pub outcome: RunOutcome,
    /// Settings in effect for this run
    pub settings: ExtractionSettings,
}

/// Errors from a single chapter's model call
#[derive(Debug, thiserror::Error)]
pub enum ExtractionServiceError {
    /// Error from the underlying LLM client
    #[error("LLM error: {0}")]
    LlmError(String),
    #[error("LLM request timed out after {0:?}")]
    Timeout(Duration),
    #[error("LLM returned an empty response")]
    EmptyResponse,
}

/// Service for extracting, validating and sequencing a book's scenes
pub struct ExtractionService<L: LlmPort> {
    llm: Arc<L>,
    renderer: Arc<dyn DocumentRendererPort>,
    validator: SceneValidator,
    config: ExtractionServiceConfig,
}

impl<L: LlmPort> ExtractionService<L> {
    pub fn new(
        llm: Arc<L>,
        renderer: Arc<dyn DocumentRendererPort>,
        settings: ExtractionSettings,
        config: ExtractionServiceConfig,
    ) -> Self {
        Self {
            llm,
            renderer,
            validator: SceneValidator::new(settings),
            config,
        }
    }

    pub fn settings(&self) -> &ExtractionSettings {
        self.validator.settings()
    }

    /// Extract, sequence and render every chapter of a book
    ///
    /// Chapter failures are recorded in the run; they never abort it.
    pub async fn run(&self, book_title: &str, chapters: Vec<String>) -> ExtractionRun {
        let run_id = RunId::new();
        let started_at = Utc::now();
        tracing::info!(
            %run_id,
            book_title,
            chapters = chapters.len(),
            "Starting extraction run"
        );

        let instructions =
            build_extraction_instructions(book_title, self.validator.settings().min_scenes());

        // Futures are lazy; buffered() polls at most `concurrency` of them and
        // yields in input order regardless of completion order
        let tasks: Vec<_> = chapters
            .into_iter()
            .enumerate()
            .map(|(i, text)| self.extract_chapter(&instructions, i + 1, text))
            .collect();
        let results: Vec<ChapterResult> = stream::iter(tasks)
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let summaries: Vec<ChapterSummary> = results.iter().map(ChapterSummary::from).collect();
        let failed_chapters = summaries.iter().filter(|s| s.error.is_some()).count();

        let scenes = sequence(results);
        let outcome = RunOutcome::classify(scenes.len(), failed_chapters);

        match outcome {
            RunOutcome::ScenesGenerated { total } => {
                tracing::info!(%run_id, total, failed_chapters, "Extraction run complete");
            }
            RunOutcome::NoScenesWithErrors { failed_chapters } => {
                tracing::error!(%run_id, failed_chapters, "Extraction run produced no scenes");
            }
            RunOutcome::NoScenesDetected => {
                tracing::warn!(
                    %run_id,
                    "Extraction run produced no scenes and no errors; the source may not be narrative text"
                );
            }
        }

        let documents = self.renderer.render(book_title, &scenes);

        ExtractionRun {
            run_id,
            book_title: book_title.to_string(),
            started_at,
            finished_at: Utc::now(),
            chapters: summaries,
            scenes,
            documents,
            outcome,
            settings: self.validator.settings().clone(),
        }
    }

    /// Extract one chapter, re-prompting on low coverage when configured
    ///
    /// Of several attempts, the one with the most scenes wins; the earlier
    /// attempt wins a tie.
    pub async fn extract_chapter(
        &self,
        instructions: &str,
        chapter_index: usize,
        chapter_text: String,
    ) -> ChapterResult {
        let message =
            build_chapter_message(&chapter_text, self.validator.settings().max_chapter_chars);
        let attempts = 1 + self.validator.settings().coverage_retries;
        let mut best: Option<ChapterResult> = None;

        for attempt in 1..=attempts {
            let result = match self.request_payload(instructions, &message).await {
                Ok(payload) => self.validator.validate_and_repair(&payload, chapter_index),
                Err(e) => {
                    tracing::error!(chapter = chapter_index, error = %e, "Chapter extraction failed");
                    ChapterResult::failed(chapter_index, ChapterError::Extraction(e.to_string()))
                }
            };

            if result.is_failed() {
                return best.unwrap_or(result);
            }

            let covered = result.coverage_warning.is_none();
            best = match best {
                Some(previous) if previous.scene_count() >= result.scene_count() => Some(previous),
                _ => Some(result),
            };

            if covered {
                break;
            }
            if attempt < attempts {
                tracing::info!(
                    chapter = chapter_index,
                    attempt,
                    "Coverage too low, re-prompting for more scenes"
                );
            }
        }

        best.unwrap_or_else(|| {
            ChapterResult::failed(
                chapter_index,
                ChapterError::Extraction("no extraction attempt was made".to_string()),
            )
        })
    }

    /// Call the model with timeout and exponential backoff on transient errors
    async fn request_payload(
        &self,
        instructions: &str,
        message: &str,
    ) -> Result<String, ExtractionServiceError> {
        // from_millis(2) yields 2, 4, 8, ... so halve the initial delay for the factor
        let unit_ms = (self.config.retry_initial_backoff.as_millis() as u64 / 2).max(1);
        let retry_strategy = ExponentialBackoff::from_millis(2)
            .factor(unit_ms)
            .max_delay(Duration::from_secs(30))
            .map(jitter)
            .take(self.config.max_retries);

        let llm = &self.llm;
        let timeout = self.config.request_timeout;

        let response = Retry::spawn(retry_strategy, move || async move {
            let request = LlmRequest::new(vec![ChatMessage::user(message)])
                .with_system_prompt(instructions)
                .with_temperature(0.4)
                .with_json_output();

            match tokio::time::timeout(timeout, llm.generate(request)).await {
                Ok(Ok(response)) => Ok(response),
                Ok(Err(e)) if e.is_retryable() => {
                    tracing::warn!("Transient LLM error, will retry: {}", e);
                    Err(RetryError::Transient {
                        err: ExtractionServiceError::LlmError(e.to_string()),
                        retry_after: None,
                    })
                }
                Ok(Err(e)) => {
                    tracing::warn!("Permanent LLM error, failing immediately: {}", e);
                    Err(RetryError::Permanent(ExtractionServiceError::LlmError(
                        e.to_string(),
                    )))
                }
                Err(_) => {
                    tracing::warn!("LLM request timed out after {:?}, will retry", timeout);
                    Err(RetryError::Transient {
                        err: ExtractionServiceError::Timeout(timeout),
                        retry_after: None,
                    })
                }
            }
        })
        .await?;

        tracing::debug!(
            model = %response.model,
            tokens = response.tokens_used,
            "Received chapter payload"
        );

        if response.content.trim().is_empty() {
            return Err(ExtractionServiceError::EmptyResponse);
        }
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{LlmResponse, RenderedDocument};
    use crate::domain::value_objects::SKYBOX_NEGATIVE_PROMPT;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, thiserror::Error)]
    #[error("mock failure (retryable: {retryable})")]
    struct MockError {
        retryable: bool,
    }

    impl RetryableError for MockError {
        fn is_retryable(&self) -> bool {
            self.retryable
        }
    }

    type Responder = Box<dyn Fn(&str, usize) -> Result<String, MockError> + Send + Sync>;

    /// Mock LLM answering by chapter text; receives the user message and the call number
    struct ScriptedLlm {
        responder: Responder,
        calls: AtomicUsize,
        delay: Box<dyn Fn(&str) -> Duration + Send + Sync>,
        completed: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn new(
            responder: impl Fn(&str, usize) -> Result<String, MockError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                responder: Box::new(responder),
                calls: AtomicUsize::new(0),
                delay: Box::new(|_: &str| Duration::ZERO),
                completed: Mutex::new(Vec::new()),
            }
        }

        fn with_delay(self, delay: Duration) -> Self {
            self.with_delay_by(move |_| delay)
        }

        /// Sleep per call, chosen from the user message
        fn with_delay_by(mut self, delay: impl Fn(&str) -> Duration + Send + Sync + 'static) -> Self {
            self.delay = Box::new(delay);
            self
        }

        /// User messages in the order their calls finished
        fn completed(&self) -> Vec<String> {
            self.completed.lock().unwrap().clone()
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl LlmPort for ScriptedLlm {
        type Error = MockError;

        async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, Self::Error> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let message = request
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            let delay = (self.delay)(&message);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            self.completed.lock().unwrap().push(message.clone());
            (self.responder)(&message, call).map(|content| LlmResponse {
                content,
                model: "mock".to_string(),
                tokens_used: 0,
            })
        }
    }

    struct CountingRenderer;

    impl DocumentRendererPort for CountingRenderer {
        fn render(&self, book_title: &str, scenes: &[SequencedScene]) -> RenderedDocuments {
            let document = |kind: &str| RenderedDocument {
                file_name: format!("{}_{}.md", book_title, kind),
                content: scenes.len().to_string(),
            };
            RenderedDocuments {
                trigger_sentences: document("triggers"),
                environment_prompts: document("environments"),
                character_prompts: document("characters"),
            }
        }
    }

    fn scenes_payload(prefix: &str, count: usize, cast: usize) -> String {
        let scenes: Vec<_> = (0..count)
            .map(|i| {
                let characters: Vec<_> = (0..cast)
                    .map(|c| {
                        json!({
                            "name": format!("{}-char-{}", prefix, c),
                            "role": if c == 0 { "Main" } else { "Secondary" },
                            "visual_description": "visual"
                        })
                    })
                    .collect();
                json!({
                    "location": "somewhere",
                    "chapter_beat": format!("Part {} of {}", i + 1, count),
                    "trigger_sentence": format!("{} trigger {}", prefix, i),
                    "characters": characters,
                    "skybox_environment": {
                        "visual_prompt": "ground view",
                        "environment_type": "Outdoors"
                    }
                })
            })
            .collect();
        json!({ "scenes": scenes }).to_string()
    }

    fn fast_config() -> ExtractionServiceConfig {
        ExtractionServiceConfig {
            request_timeout: Duration::from_secs(5),
            max_retries: 2,
            retry_initial_backoff: Duration::from_millis(2),
            concurrency: 3,
        }
    }

    fn service(llm: Arc<ScriptedLlm>, settings: ExtractionSettings) -> ExtractionService<ScriptedLlm> {
        ExtractionService::new(llm, Arc::new(CountingRenderer), settings, fast_config())
    }

    #[tokio::test]
    async fn test_run_sequences_chapters_in_order() {
        let llm = Arc::new(ScriptedLlm::new(|message, _| {
            if message.contains("CHAPTER-ONE") {
                Ok(scenes_payload("one", 2, 1))
            } else {
                Ok(scenes_payload("two", 1, 3))
            }
        }));
        let service = service(llm, ExtractionSettings::default().with_min_scenes(1));

        let run = service
            .run(
                "Pooh",
                vec!["CHAPTER-ONE text".to_string(), "CHAPTER-TWO text".to_string()],
            )
            .await;

        assert_eq!(run.outcome, RunOutcome::ScenesGenerated { total: 3 });
        let ids: Vec<String> = run.scenes.iter().map(|s| s.scene_id.to_string()).collect();
        assert_eq!(ids, vec!["ch01", "ch02", "ch03"]);
        assert_eq!(run.scenes[0].scene.trigger_sentence, "one trigger 0");

        let third = &run.scenes[2];
        assert_eq!(third.chapter_index, 2);
        assert_eq!(third.main_ref.as_ref().unwrap().reference, "ch03mc01");
        let secondary: Vec<&str> = third.secondary_refs.iter().map(|r| r.reference.as_str()).collect();
        assert_eq!(secondary, vec!["ch03sc01", "ch03sc02"]);
        assert_eq!(third.scene.environment.negative_prompt(), SKYBOX_NEGATIVE_PROMPT);

        assert_eq!(run.documents.trigger_sentences.content, "3");
        assert_eq!(run.chapters.len(), 2);
        assert_eq!(run.settings.min_scenes(), 1);
    }

    #[tokio::test]
    async fn test_slow_first_chapter_keeps_document_order() {
        let llm = Arc::new(
            ScriptedLlm::new(|message, _| {
                if message.contains("CHAPTER-ONE") {
                    Ok(scenes_payload("one", 2, 1))
                } else if message.contains("CHAPTER-TWO") {
                    Ok(scenes_payload("two", 2, 1))
                } else {
                    Ok(scenes_payload("three", 1, 1))
                }
            })
            .with_delay_by(|message| {
                if message.contains("CHAPTER-ONE") {
                    Duration::from_millis(50)
                } else {
                    Duration::ZERO
                }
            }),
        );
        let service = service(llm.clone(), ExtractionSettings::default().with_min_scenes(1));

        let run = service
            .run(
                "Pooh",
                vec![
                    "CHAPTER-ONE text".to_string(),
                    "CHAPTER-TWO text".to_string(),
                    "CHAPTER-THREE text".to_string(),
                ],
            )
            .await;

        // the first chapter really did finish last
        let completed = llm.completed();
        assert_eq!(completed.len(), 3);
        assert!(completed[2].contains("CHAPTER-ONE"));

        let numbered: Vec<(String, usize, &str)> = run
            .scenes
            .iter()
            .map(|s| {
                (
                    s.scene_id.to_string(),
                    s.chapter_index,
                    s.scene.trigger_sentence.as_str(),
                )
            })
            .collect();
        assert_eq!(
            numbered,
            vec![
                ("ch01".to_string(), 1, "one trigger 0"),
                ("ch02".to_string(), 1, "one trigger 1"),
                ("ch03".to_string(), 2, "two trigger 0"),
                ("ch04".to_string(), 2, "two trigger 1"),
                ("ch05".to_string(), 3, "three trigger 0"),
            ]
        );
        let chapter_order: Vec<usize> = run.chapters.iter().map(|c| c.chapter_index).collect();
        assert_eq!(chapter_order, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_bad_chapter_does_not_stop_the_run() {
        let llm = Arc::new(ScriptedLlm::new(|message, _| {
            if message.contains("BROKEN") {
                Ok(r#"{"scenes": [{"location": "x"}]}"#.to_string())
            } else if message.contains("GARBLED") {
                Ok("not json at all".to_string())
            } else {
                Ok(scenes_payload("ok", 2, 1))
            }
        }));
        let service = service(llm, ExtractionSettings::default());

        let run = service
            .run(
                "Pooh",
                vec![
                    "GOOD first".to_string(),
                    "BROKEN second".to_string(),
                    "GARBLED third".to_string(),
                    "GOOD fourth".to_string(),
                ],
            )
            .await;

        assert_eq!(run.outcome, RunOutcome::ScenesGenerated { total: 4 });
        assert!(matches!(
            run.chapters[1].error,
            Some(ChapterError::SchemaViolation(_))
        ));
        assert!(matches!(
            run.chapters[2].error,
            Some(ChapterError::PayloadDecode { .. })
        ));
        let last = &run.scenes[3];
        assert_eq!(last.scene_id.to_string(), "ch04");
        assert_eq!(last.chapter_index, 4);
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        let llm = Arc::new(ScriptedLlm::new(|_, call| {
            if call < 3 {
                Err(MockError { retryable: true })
            } else {
                Ok(scenes_payload("ok", 2, 1))
            }
        }));
        let service = service(llm.clone(), ExtractionSettings::default());

        let run = service.run("Pooh", vec!["text".to_string()]).await;

        assert_eq!(llm.calls(), 3);
        assert_eq!(run.outcome, RunOutcome::ScenesGenerated { total: 2 });
    }

    #[tokio::test]
    async fn test_permanent_errors_are_not_retried() {
        let llm = Arc::new(ScriptedLlm::new(|_, _| Err(MockError { retryable: false })));
        let service = service(llm.clone(), ExtractionSettings::default());

        let run = service.run("Pooh", vec!["text".to_string()]).await;

        assert_eq!(llm.calls(), 1);
        assert_eq!(
            run.outcome,
            RunOutcome::NoScenesWithErrors { failed_chapters: 1 }
        );
        assert!(matches!(
            run.chapters[0].error,
            Some(ChapterError::Extraction(_))
        ));
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let llm = Arc::new(ScriptedLlm::new(|_, _| Err(MockError { retryable: true })));
        let service = service(llm.clone(), ExtractionSettings::default());

        let run = service.run("Pooh", vec!["text".to_string()]).await;

        // first attempt plus max_retries
        assert_eq!(llm.calls(), 3);
        assert!(run.scenes.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_becomes_chapter_error() {
        let llm = Arc::new(
            ScriptedLlm::new(|_, _| Ok(scenes_payload("slow", 2, 1)))
                .with_delay(Duration::from_millis(200)),
        );
        let config = ExtractionServiceConfig {
            request_timeout: Duration::from_millis(10),
            max_retries: 0,
            ..fast_config()
        };
        let service = ExtractionService::new(
            llm,
            Arc::new(CountingRenderer),
            ExtractionSettings::default(),
            config,
        );

        let run = service.run("Pooh", vec!["text".to_string()]).await;

        match &run.chapters[0].error {
            Some(ChapterError::Extraction(message)) => assert!(message.contains("timed out")),
            other => panic!("Expected extraction timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_response_is_an_extraction_error() {
        let llm = Arc::new(ScriptedLlm::new(|_, _| Ok("   ".to_string())));
        let service = service(llm, ExtractionSettings::default());

        let run = service.run("Pooh", vec!["text".to_string()]).await;

        assert!(matches!(
            run.chapters[0].error,
            Some(ChapterError::Extraction(_))
        ));
    }

    #[tokio::test]
    async fn test_coverage_retry_keeps_best_attempt() {
        let llm = Arc::new(ScriptedLlm::new(|_, call| match call {
            1 => Ok(scenes_payload("first", 1, 1)),
            _ => Ok(scenes_payload("second", 3, 1)),
        }));
        let settings = ExtractionSettings::default()
            .with_min_scenes(3)
            .with_coverage_retries(2);
        let service = service(llm.clone(), settings);

        let run = service.run("Pooh", vec!["text".to_string()]).await;

        assert_eq!(llm.calls(), 2);
        assert_eq!(run.scenes.len(), 3);
        assert_eq!(run.chapters[0].coverage_warning, None);
        assert_eq!(run.scenes[0].scene.trigger_sentence, "second trigger 0");
    }

    #[tokio::test]
    async fn test_coverage_retry_exhausted_keeps_warning() {
        let llm = Arc::new(ScriptedLlm::new(|_, _| Ok(scenes_payload("thin", 1, 1))));
        let settings = ExtractionSettings::default()
            .with_min_scenes(2)
            .with_coverage_retries(1);
        let service = service(llm.clone(), settings);

        let run = service.run("Pooh", vec!["text".to_string()]).await;

        assert_eq!(llm.calls(), 2);
        assert_eq!(run.scenes.len(), 1);
        assert_eq!(
            run.chapters[0].coverage_warning,
            Some(CoverageWarning { found: 1, minimum: 2 })
        );
    }

    #[tokio::test]
    async fn test_no_coverage_retry_by_default() {
        let llm = Arc::new(ScriptedLlm::new(|_, _| Ok(scenes_payload("thin", 1, 1))));
        let service = service(llm.clone(), ExtractionSettings::default());

        let run = service.run("Pooh", vec!["text".to_string()]).await;

        assert_eq!(llm.calls(), 1);
        assert!(run.chapters[0].coverage_warning.is_some());
    }

    #[tokio::test]
    async fn test_scene_free_book_is_distinct_from_failures() {
        let llm = Arc::new(ScriptedLlm::new(|_, _| Ok(r#"{"scenes": []}"#.to_string())));
        let service = service(llm, ExtractionSettings::default());

        let run = service.run("Pooh", vec!["a".to_string(), "b".to_string()]).await;

        assert_eq!(run.outcome, RunOutcome::NoScenesDetected);
        assert!(run.chapters.iter().all(|c| c.error.is_none()));
    }

    #[tokio::test]
    async fn test_chapter_text_is_capped() {
        let llm = Arc::new(ScriptedLlm::new(|message, _| {
            if message.contains("TAIL") {
                Ok("leaked".to_string())
            } else {
                Ok(scenes_payload("ok", 2, 1))
            }
        }));
        let settings = ExtractionSettings {
            max_chapter_chars: 10,
            ..Default::default()
        };
        let service = service(llm, settings);

        let text = format!("{}TAIL", "x".repeat(20));
        let run = service.run("Pooh", vec![text]).await;

        assert_eq!(run.scenes.len(), 2);
    }

    #[test]
    fn test_outcome_classification() {
        assert_eq!(RunOutcome::classify(0, 0), RunOutcome::NoScenesDetected);
        assert_eq!(
            RunOutcome::classify(0, 2),
            RunOutcome::NoScenesWithErrors { failed_chapters: 2 }
        );
        assert_eq!(
            RunOutcome::classify(5, 1),
            RunOutcome::ScenesGenerated { total: 5 }
        );
    }
}
