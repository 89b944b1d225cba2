use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::RenderedDocuments;
use crate::application::services::{ChapterSummary, ExtractionRun, RunOutcome};
use crate::domain::entities::{ChapterError, Character, Environment, SequencedScene};
use crate::domain::value_objects::ExtractionSettings;

/// Request body for starting an extraction run
///
/// Either `chapters` (already split) or `text` (split server-side) must be
/// given; `chapters` wins when both are present.
#[derive(Debug, Deserialize)]
pub struct CreateExtractionRequestDto {
    pub book_title: String,
    #[serde(default)]
    pub chapters: Option<Vec<String>>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InstructionsQueryDto {
    pub book_title: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractionRunResponseDto {
    pub run_id: String,
    pub book_title: String,
    pub started_at: String,
    pub finished_at: String,
    pub outcome: RunOutcomeDto,
    pub chapters: Vec<ChapterReportDto>,
    pub scenes: Vec<SequencedSceneResponseDto>,
    pub documents: RenderedDocuments,
    pub settings: ExtractionSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcomeDto {
    ScenesGenerated { total: usize },
    NoScenesWithErrors { failed_chapters: usize },
    NoScenesDetected,
}

#[derive(Debug, Serialize)]
pub struct ChapterReportDto {
    pub chapter_index: usize,
    pub scene_count: usize,
    /// `payload_decode`, `schema_violation` or `extraction`
    pub error_kind: Option<String>,
    pub error: Option<String>,
    pub coverage_warning: Option<String>,
    pub duplicate_triggers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SequencedSceneResponseDto {
    pub global_index: u32,
    pub scene_id: String,
    pub chapter_index: usize,
    pub location: String,
    pub chapter_beat: String,
    pub trigger_sentence: String,
    pub background_ref: String,
    pub environment: EnvironmentResponseDto,
    pub characters: Vec<CharacterResponseDto>,
}

#[derive(Debug, Serialize)]
pub struct EnvironmentResponseDto {
    pub visual_prompt: String,
    pub environment_type: String,
    pub negative_prompt: String,
}

#[derive(Debug, Serialize)]
pub struct CharacterResponseDto {
    pub reference: String,
    pub name: String,
    pub role: String,
    pub visual_description: String,
}

impl From<RunOutcome> for RunOutcomeDto {
    fn from(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::ScenesGenerated { total } => Self::ScenesGenerated { total },
            RunOutcome::NoScenesWithErrors { failed_chapters } => {
                Self::NoScenesWithErrors { failed_chapters }
            }
            RunOutcome::NoScenesDetected => Self::NoScenesDetected,
        }
    }
}

impl From<ChapterSummary> for ChapterReportDto {
    fn from(c: ChapterSummary) -> Self {
        let error_kind = c.error.as_ref().map(|e| {
            match e {
                ChapterError::PayloadDecode { .. } => "payload_decode",
                ChapterError::SchemaViolation(_) => "schema_violation",
                ChapterError::Extraction(_) => "extraction",
            }
            .to_string()
        });
        Self {
            chapter_index: c.chapter_index,
            scene_count: c.scene_count,
            error_kind,
            error: c.error.map(|e| e.to_string()),
            coverage_warning: c.coverage_warning.map(|w| w.to_string()),
            duplicate_triggers: c.duplicate_triggers,
        }
    }
}

impl From<&Environment> for EnvironmentResponseDto {
    fn from(e: &Environment) -> Self {
        Self {
            visual_prompt: e.visual_prompt.clone(),
            environment_type: e.environment_type.to_string(),
            negative_prompt: e.negative_prompt().to_string(),
        }
    }
}

impl CharacterResponseDto {
    fn new(reference: &str, c: &Character) -> Self {
        Self {
            reference: reference.to_string(),
            name: c.name.clone(),
            role: c.role.to_string(),
            visual_description: c.visual_description.clone(),
        }
    }
}

impl From<&SequencedScene> for SequencedSceneResponseDto {
    fn from(s: &SequencedScene) -> Self {
        Self {
            global_index: s.global_index,
            scene_id: s.scene_id.to_string(),
            chapter_index: s.chapter_index,
            location: s.scene.location.clone(),
            chapter_beat: s.scene.chapter_beat.clone(),
            trigger_sentence: s.scene.trigger_sentence.clone(),
            background_ref: s.background_ref.clone(),
            environment: EnvironmentResponseDto::from(&s.scene.environment),
            characters: s
                .cast()
                .into_iter()
                .map(|(reference, c)| CharacterResponseDto::new(reference, c))
                .collect(),
        }
    }
}

impl From<ExtractionRun> for ExtractionRunResponseDto {
    fn from(run: ExtractionRun) -> Self {
        Self {
            run_id: run.run_id.to_string(),
            book_title: run.book_title,
            started_at: run.started_at.to_rfc3339(),
            finished_at: run.finished_at.to_rfc3339(),
            outcome: run.outcome.into(),
            chapters: run.chapters.into_iter().map(ChapterReportDto::from).collect(),
            scenes: run.scenes.iter().map(SequencedSceneResponseDto::from).collect(),
            documents: run.documents,
            settings: run.settings,
        }
    }
}
