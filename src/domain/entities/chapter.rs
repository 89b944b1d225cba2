//! Chapter results - The accept/reject outcome of one chapter's extraction

use super::Scene;

/// Outcome of extracting one chapter
///
/// A failed chapter carries an error and no scenes; it never stops the run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterResult {
    /// 1-based position of the chapter in the document
    pub chapter_index: usize,
    pub scenes: Vec<Scene>,
    pub error: Option<ChapterError>,
    pub coverage_warning: Option<CoverageWarning>,
    /// Trigger sentences that appeared on more than one scene in this batch
    pub duplicate_triggers: Vec<String>,
}

impl ChapterResult {
    pub fn accepted(chapter_index: usize, scenes: Vec<Scene>) -> Self {
        Self {
            chapter_index,
            scenes,
            error: None,
            coverage_warning: None,
            duplicate_triggers: Vec::new(),
        }
    }

    pub fn failed(chapter_index: usize, error: ChapterError) -> Self {
        Self {
            chapter_index,
            scenes: Vec::new(),
            error: Some(error),
            coverage_warning: None,
            duplicate_triggers: Vec::new(),
        }
    }

    pub fn with_coverage_warning(mut self, warning: CoverageWarning) -> Self {
        self.coverage_warning = Some(warning);
        self
    }

    pub fn with_duplicate_triggers(mut self, duplicates: Vec<String>) -> Self {
        self.duplicate_triggers = duplicates;
        self
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Why a chapter contributed no scenes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChapterError {
    /// The payload could not be decoded as JSON
    #[error("Payload decode error: {diagnostic}")]
    PayloadDecode {
        diagnostic: String,
        raw_payload: String,
    },
    /// The payload decoded but did not match the scene schema
    #[error(transparent)]
    SchemaViolation(#[from] SchemaViolation),
    /// The model call itself failed (timeout, HTTP error, empty response)
    #[error("Extraction error: {0}")]
    Extraction(String),
}

/// A payload field that failed structural validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Schema violation at `{path}`: {reason}")]
pub struct SchemaViolation {
    /// Field path, e.g. `scenes[0].characters[1].role`
    pub path: String,
    pub reason: String,
}

impl SchemaViolation {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A chapter came back with fewer scenes than the configured minimum
///
/// Informational only; the scenes are still accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageWarning {
    pub found: usize,
    pub minimum: usize,
}

impl std::fmt::Display for CoverageWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Coverage too low: found {} scene(s), expected at least {}",
            self.found, self.minimum
        )
    }
}
