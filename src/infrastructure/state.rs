//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::outbound::ChapterSourcePort;
use crate::application::services::ExtractionService;
use crate::infrastructure::chapters::PlainTextChapterSource;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::export::MarkdownRenderer;
use crate::infrastructure::ollama::OllamaClient;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub chapter_source: Arc<dyn ChapterSourcePort>,
    pub extraction_service: ExtractionService<OllamaClient>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        // Initialize Ollama client
        let llm_client = Arc::new(OllamaClient::new(
            &config.ollama_base_url,
            &config.ollama_model,
        ));

        let extraction_service = ExtractionService::new(
            llm_client,
            Arc::new(MarkdownRenderer::new()),
            config.extraction.clone(),
            config.extraction_service(),
        );

        Ok(Self {
            chapter_source: Arc::new(PlainTextChapterSource::new()),
            extraction_service,
            config,
        })
    }
}
