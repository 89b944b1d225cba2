//! Scene validator - Decode, validate and repair one chapter's model payload
//!
//! Every failure is represented in the returned [`ChapterResult`]; nothing
//! here returns an error to the caller, so one bad chapter never stops a run.

use std::collections::HashSet;

use serde_json::Value;

use crate::application::services::scene_schema::parse_chapter_output;
use crate::domain::entities::{ChapterError, ChapterResult, CoverageWarning, Scene};
use crate::domain::value_objects::ExtractionSettings;

/// Validator and repair engine for model payloads
#[derive(Debug, Clone)]
pub struct SceneValidator {
    settings: ExtractionSettings,
}

impl SceneValidator {
    pub fn new(settings: ExtractionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ExtractionSettings {
        &self.settings
    }

    /// Turn a raw payload into the chapter's accepted scenes
    ///
    /// Decode and schema failures produce an empty scene list plus the error.
    /// Accepted scenes always leave with a negative prompt; a short chapter is
    /// flagged with a coverage warning but still accepted.
    pub fn validate_and_repair(&self, raw_payload: &str, chapter_index: usize) -> ChapterResult {
        let value = match decode_payload(raw_payload) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(chapter = chapter_index, error = %e, "Chapter payload could not be decoded");
                return ChapterResult::failed(chapter_index, e);
            }
        };

        let mut scenes = match parse_chapter_output(&value) {
            Ok(scenes) => scenes,
            Err(violation) => {
                tracing::warn!(
                    chapter = chapter_index,
                    path = %violation.path,
                    reason = %violation.reason,
                    "Chapter payload failed schema validation"
                );
                return ChapterResult::failed(chapter_index, violation.into());
            }
        };

        self.repair(&mut scenes);

        let duplicates = duplicate_triggers(&scenes);
        if !duplicates.is_empty() {
            tracing::warn!(
                chapter = chapter_index,
                count = duplicates.len(),
                "Chapter reused trigger sentences across scenes"
            );
        }

        let mut result =
            ChapterResult::accepted(chapter_index, scenes).with_duplicate_triggers(duplicates);

        if let Some(warning) = self.check_coverage(result.scene_count()) {
            tracing::warn!(chapter = chapter_index, "{}", warning);
            result = result.with_coverage_warning(warning);
        }

        tracing::debug!(
            chapter = chapter_index,
            scenes = result.scene_count(),
            "Chapter payload accepted"
        );
        result
    }

    /// Apply the deterministic repairs to decoded scenes
    pub fn repair(&self, scenes: &mut [Scene]) {
        for scene in scenes.iter_mut() {
            scene.environment.repair_negative_prompt(
                &self.settings.negative_prompt,
                self.settings.negative_prompt_policy,
            );
        }
    }

    /// Coverage warning when `found` is under the configured minimum
    pub fn check_coverage(&self, found: usize) -> Option<CoverageWarning> {
        let minimum = self.settings.min_scenes();
        (found < minimum).then_some(CoverageWarning { found, minimum })
    }
}

/// Decode a model payload as JSON
///
/// Models often wrap the object in Markdown fences or a sentence of prose, so
/// when the whole text does not decode, every `{`/`[` is tried in order as the
/// start of the payload. The first one that decodes to an object, or to an
/// array of objects, wins; trailing text after it is ignored.
pub fn decode_payload(raw_payload: &str) -> Result<Value, ChapterError> {
    let trimmed = raw_payload.trim();
    if trimmed.is_empty() {
        return Err(ChapterError::PayloadDecode {
            diagnostic: "empty payload".to_string(),
            raw_payload: raw_payload.to_string(),
        });
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => Ok(value),
        Err(e) => embedded_json(trimmed).ok_or_else(|| ChapterError::PayloadDecode {
            diagnostic: e.to_string(),
            raw_payload: raw_payload.to_string(),
        }),
    }
}

fn embedded_json(text: &str) -> Option<Value> {
    text.match_indices(|c| c == '{' || c == '[')
        .filter_map(|(start, _)| {
            serde_json::Deserializer::from_str(&text[start..])
                .into_iter::<Value>()
                .next()?
                .ok()
        })
        .find(is_payload_shaped)
}

fn is_payload_shaped(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => items.iter().all(Value::is_object),
        _ => false,
    }
}

/// Trigger sentences used by more than one scene, in first-seen order
fn duplicate_triggers(scenes: &[Scene]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for scene in scenes {
        let trigger = scene.trigger_sentence.trim();
        if !seen.insert(trigger) && reported.insert(trigger) {
            duplicates.push(trigger.to_string());
        }
    }

    duplicates
}
