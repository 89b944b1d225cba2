//! Extraction API routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    CreateExtractionRequestDto, ExtractionRunResponseDto, InstructionsQueryDto,
};
use crate::application::services::llm::build_extraction_instructions;
use crate::infrastructure::state::AppState;

pub async fn health_check() -> &'static str {
    "OK"
}

/// Preview the instruction text sent to the model for a book
pub async fn preview_instructions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InstructionsQueryDto>,
) -> Result<String, (StatusCode, String)> {
    let book_title = required_title(&query.book_title)?;
    Ok(build_extraction_instructions(
        book_title,
        state.extraction_service.settings().min_scenes(),
    ))
}

/// Run scene extraction over a whole book
pub async fn create_extraction(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateExtractionRequestDto>,
) -> Result<Json<ExtractionRunResponseDto>, (StatusCode, String)> {
    let book_title = required_title(&req.book_title)?;

    let chapters: Vec<String> = match (req.chapters, req.text) {
        (Some(chapters), _) => chapters
            .into_iter()
            .filter(|chapter| !chapter.trim().is_empty())
            .collect(),
        (None, Some(text)) => state.chapter_source.split_chapters(&text),
        (None, None) => Vec::new(),
    };

    if chapters.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Request must contain at least one non-empty chapter".to_string(),
        ));
    }

    let run = state.extraction_service.run(book_title, chapters).await;
    Ok(Json(ExtractionRunResponseDto::from(run)))
}

fn required_title(book_title: &str) -> Result<&str, (StatusCode, String)> {
    let book_title = book_title.trim();
    if book_title.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "book_title must not be empty".to_string(),
        ));
    }
    Ok(book_title)
}
