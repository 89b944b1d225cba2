//! Extraction settings value object
//!
//! # Architectural Note (Settings Serialization)
//!
//! ExtractionSettings intentionally includes serde derives because the
//! effective settings are echoed back in every run report, so the JSON shape
//! is part of the API contract.

use serde::{Deserialize, Serialize};

/// Canonical exclusion list for skybox image generation
///
/// Never sourced from the model; the validator injects it.
pub const SKYBOX_NEGATIVE_PROMPT: &str = "people, person, faces, crowds, animals, text, letters, signage, \
watermark, logo, UI, placeable props, furniture, vehicles, \
modern objects, anachronistic items, blurry";

/// How a model-supplied negative prompt is treated during repair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativePromptPolicy {
    /// Keep a non-empty model value, fill in the canonical one otherwise
    #[default]
    FillMissing,
    /// Always replace whatever the model sent with the canonical value
    AlwaysOverwrite,
}

impl std::str::FromStr for NegativePromptPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fill_missing" => Ok(Self::FillMissing),
            "always_overwrite" => Ok(Self::AlwaysOverwrite),
            other => Err(format!("Unknown negative prompt policy: {}", other)),
        }
    }
}

/// Settings that shape extraction, validation and repair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionSettings {
    /// Minimum scenes the model is asked for per chapter (at least 1)
    pub min_scenes_per_chapter: usize,
    /// Canonical negative prompt injected into every environment
    pub negative_prompt: String,
    /// Chapter text is cut to this many characters before it is sent
    pub max_chapter_chars: usize,
    pub negative_prompt_policy: NegativePromptPolicy,
    /// Extra extraction attempts for a chapter that comes back under the minimum
    pub coverage_retries: u32,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            min_scenes_per_chapter: 2,
            negative_prompt: SKYBOX_NEGATIVE_PROMPT.to_string(),
            max_chapter_chars: 45_000,
            negative_prompt_policy: NegativePromptPolicy::FillMissing,
            coverage_retries: 0,
        }
    }
}

impl ExtractionSettings {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_scenes_per_chapter: env_or("SCENEPACK_MIN_SCENES", defaults.min_scenes_per_chapter)
                .max(1),
            negative_prompt: env_or("SCENEPACK_NEGATIVE_PROMPT", defaults.negative_prompt),
            max_chapter_chars: env_or("SCENEPACK_MAX_CHAPTER_CHARS", defaults.max_chapter_chars),
            negative_prompt_policy: env_or(
                "SCENEPACK_NEGATIVE_PROMPT_POLICY",
                defaults.negative_prompt_policy,
            ),
            coverage_retries: env_or("SCENEPACK_COVERAGE_RETRIES", defaults.coverage_retries),
        }
    }

    pub fn with_min_scenes(mut self, min_scenes: usize) -> Self {
        self.min_scenes_per_chapter = min_scenes.max(1);
        self
    }

    pub fn with_policy(mut self, policy: NegativePromptPolicy) -> Self {
        self.negative_prompt_policy = policy;
        self
    }

    pub fn with_coverage_retries(mut self, retries: u32) -> Self {
        self.coverage_retries = retries;
        self
    }

    /// Minimum scenes per chapter, never below 1
    pub fn min_scenes(&self) -> usize {
        self.min_scenes_per_chapter.max(1)
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
