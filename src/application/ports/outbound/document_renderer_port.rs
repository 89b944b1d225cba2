//! Document renderer port - Produces the three scene pack documents

use serde::Serialize;

use crate::domain::entities::SequencedScene;

/// One rendered output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub file_name: String,
    pub content: String,
}

/// The three cross-referenced documents of a scene pack, keyed by scene id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocuments {
    pub trigger_sentences: RenderedDocument,
    pub environment_prompts: RenderedDocument,
    pub character_prompts: RenderedDocument,
}

/// Port for rendering sequenced scenes
pub trait DocumentRendererPort: Send + Sync {
    fn render(&self, book_title: &str, scenes: &[SequencedScene]) -> RenderedDocuments;
}
