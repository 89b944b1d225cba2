//! Application services - Use case implementations
//!
//! The pipeline runs in this order: instructions are built once per book,
//! each chapter payload is validated and repaired, and the accepted scenes
//! are sequenced in one pass at the end.

pub mod extraction_service;
pub mod llm;
pub mod scene_schema;
pub mod scene_validator;
pub mod sequencer;

pub use extraction_service::{
    ChapterSummary, ExtractionRun, ExtractionService, ExtractionServiceConfig, RunOutcome,
};
