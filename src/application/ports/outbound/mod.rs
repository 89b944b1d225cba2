//! Outbound ports - Interfaces that the application requires from external systems

mod chapter_source_port;
mod document_renderer_port;
mod llm_port;

pub use chapter_source_port::ChapterSourcePort;
pub use document_renderer_port::{DocumentRendererPort, RenderedDocument, RenderedDocuments};
pub use llm_port::{ChatMessage, LlmPort, LlmRequest, LlmResponse, MessageRole, RetryableError};
