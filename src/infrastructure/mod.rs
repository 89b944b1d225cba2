//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - HTTP: REST API routes
//! - Ollama: LLM integration for scene extraction
//! - Chapters: Plain-text chapter splitting
//! - Export: Markdown rendering of the scene pack documents
//! - Config: Application configuration
//! - State: Shared application state

pub mod chapters;
pub mod config;
pub mod export;
pub mod http;
pub mod ollama;
pub mod state;
