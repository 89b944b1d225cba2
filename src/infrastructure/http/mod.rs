//! HTTP REST API routes

mod extraction_routes;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
///
/// `max_request_bytes` replaces axum's 2 MB default body limit so whole
/// books can be posted as `text`.
pub fn create_routes(max_request_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(extraction_routes::health_check))
        .route(
            "/api/instructions",
            get(extraction_routes::preview_instructions),
        )
        .route(
            "/api/extractions",
            post(extraction_routes::create_extraction),
        )
        .layer(DefaultBodyLimit::max(max_request_bytes))
}
