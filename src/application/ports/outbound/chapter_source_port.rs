//! Chapter source port - Turns a source document into chapter text blocks

/// Port for splitting a document into chapters
///
/// Implementations must return chapters in document order and must not
/// return blank chapters.
pub trait ChapterSourcePort: Send + Sync {
    fn split_chapters(&self, document: &str) -> Vec<String>;
}
