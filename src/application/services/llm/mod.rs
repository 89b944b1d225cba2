//! LLM prompt construction

pub mod prompt_builder;

pub use prompt_builder::{build_extraction_instructions, project_label};
