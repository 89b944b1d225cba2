//! Scene Pack Engine - Cinematic scene extraction for AR scene packs
//!
//! The Engine is the backend server that:
//! - Splits a book into chapters
//! - Asks an Ollama-hosted model for each chapter's cinematic scenes
//! - Validates and repairs the model output
//! - Numbers every scene and renders the trigger, skybox and character documents

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scenepack_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Scene Pack Engine");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Ollama: {} ({})", config.ollama_base_url, config.ollama_model);
    tracing::info!(
        "  Extraction: min {} scene(s) per chapter, concurrency {}",
        config.extraction.min_scenes(),
        config.extraction_concurrency
    );
    tracing::info!("  Max request body: {} bytes", config.max_request_bytes);

    // Initialize application state
    let state = Arc::new(AppState::new(config)?);
    tracing::info!("Application state initialized");

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server_port));

    // Build the router
    let app = Router::new()
        .merge(http::create_routes(state.config.max_request_bytes))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state);

    // Start the server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let server = axum::serve(listener, app);

    // Wait for shutdown signal (Ctrl+C)
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
