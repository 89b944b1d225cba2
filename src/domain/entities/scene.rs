//! Scene entity - One cinematic moment extracted from a chapter

use crate::domain::value_objects::{CharacterRole, EnvironmentType, NegativePromptPolicy};

/// A character appearing in a scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub name: String,
    pub role: CharacterRole,
    /// Visual description only, used as the character asset prompt
    pub visual_description: String,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        role: CharacterRole,
        visual_description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            visual_description: visual_description.into(),
        }
    }
}

/// The skybox environment behind a scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Setting-only description (no people, animals or props)
    pub visual_prompt: String,
    pub environment_type: EnvironmentType,
    /// Exclusion list; absent until repair fills it
    pub negative_prompt: Option<String>,
}

impl Environment {
    pub fn new(visual_prompt: impl Into<String>, environment_type: EnvironmentType) -> Self {
        Self {
            visual_prompt: visual_prompt.into(),
            environment_type,
            negative_prompt: None,
        }
    }

    pub fn with_negative_prompt(mut self, negative_prompt: impl Into<String>) -> Self {
        self.negative_prompt = Some(negative_prompt.into());
        self
    }

    /// Fill or replace the negative prompt with the canonical exclusion list
    ///
    /// Applying this more than once with the same arguments leaves the value
    /// unchanged after the first call.
    pub fn repair_negative_prompt(&mut self, canonical: &str, policy: NegativePromptPolicy) {
        let keep_existing = policy == NegativePromptPolicy::FillMissing
            && self
                .negative_prompt
                .as_deref()
                .is_some_and(|prompt| !prompt.trim().is_empty());

        if !keep_existing {
            self.negative_prompt = Some(canonical.to_string());
        }
    }

    /// The negative prompt, or an empty string before repair
    pub fn negative_prompt(&self) -> &str {
        self.negative_prompt.as_deref().unwrap_or("")
    }
}

/// A scene - a location, an anchor quote, the cast and the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub location: String,
    /// Narrative position label, e.g. "Part 2 of 3 - Umbrella Cloud Trick"
    pub chapter_beat: String,
    /// Verbatim sentence from the chapter that anchors this scene
    pub trigger_sentence: String,
    /// Characters in the order the model listed them
    pub characters: Vec<Character>,
    pub environment: Environment,
}

impl Scene {
    pub fn new(
        location: impl Into<String>,
        chapter_beat: impl Into<String>,
        trigger_sentence: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            location: location.into(),
            chapter_beat: chapter_beat.into(),
            trigger_sentence: trigger_sentence.into(),
            characters: Vec::new(),
            environment,
        }
    }

    pub fn with_character(mut self, character: Character) -> Self {
        self.characters.push(character);
        self
    }

    /// Position of the character that receives the main reference
    ///
    /// The first character tagged Main; when none is tagged, the first
    /// character in list order. `None` only for a scene without characters.
    pub fn main_character_index(&self) -> Option<usize> {
        if self.characters.is_empty() {
            return None;
        }
        Some(
            self.characters
                .iter()
                .position(|c| c.role == CharacterRole::Main)
                .unwrap_or(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SKYBOX_NEGATIVE_PROMPT;

    fn scene_with(characters: &[(&str, CharacterRole)]) -> Scene {
        characters.iter().fold(
            Scene::new(
                "Hundred Acre Wood",
                "Part 1 of 2",
                "Pooh looked up.",
                Environment::new("forest clearing", EnvironmentType::Outdoors),
            ),
            |scene, (name, role)| scene.with_character(Character::new(*name, *role, "plush")),
        )
    }

    #[test]
    fn test_repair_fills_missing_prompt() {
        let mut env = Environment::new("attic", EnvironmentType::Indoors);
        env.repair_negative_prompt(SKYBOX_NEGATIVE_PROMPT, NegativePromptPolicy::FillMissing);
        assert_eq!(env.negative_prompt(), SKYBOX_NEGATIVE_PROMPT);
    }

    #[test]
    fn test_repair_fills_blank_prompt() {
        let mut env = Environment::new("attic", EnvironmentType::Indoors).with_negative_prompt("  ");
        env.repair_negative_prompt(SKYBOX_NEGATIVE_PROMPT, NegativePromptPolicy::FillMissing);
        assert_eq!(env.negative_prompt(), SKYBOX_NEGATIVE_PROMPT);
    }

    #[test]
    fn test_repair_keeps_model_prompt_when_filling() {
        let mut env = Environment::new("attic", EnvironmentType::Indoors).with_negative_prompt("dogs");
        env.repair_negative_prompt(SKYBOX_NEGATIVE_PROMPT, NegativePromptPolicy::FillMissing);
        assert_eq!(env.negative_prompt(), "dogs");
    }

    #[test]
    fn test_repair_overwrites_model_prompt() {
        let mut env = Environment::new("attic", EnvironmentType::Indoors).with_negative_prompt("dogs");
        env.repair_negative_prompt(SKYBOX_NEGATIVE_PROMPT, NegativePromptPolicy::AlwaysOverwrite);
        assert_eq!(env.negative_prompt(), SKYBOX_NEGATIVE_PROMPT);
    }

    #[test]
    fn test_repair_is_idempotent() {
        for policy in [NegativePromptPolicy::FillMissing, NegativePromptPolicy::AlwaysOverwrite] {
            let mut once = Environment::new("attic", EnvironmentType::Indoors);
            once.repair_negative_prompt(SKYBOX_NEGATIVE_PROMPT, policy);

            let mut twice = once.clone();
            twice.repair_negative_prompt(SKYBOX_NEGATIVE_PROMPT, policy);

            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_main_character_tagged() {
        let scene = scene_with(&[
            ("B", CharacterRole::Secondary),
            ("A", CharacterRole::Main),
            ("C", CharacterRole::Secondary),
        ]);
        assert_eq!(scene.main_character_index(), Some(1));
    }

    #[test]
    fn test_main_character_falls_back_to_first() {
        let scene = scene_with(&[("B", CharacterRole::Secondary), ("C", CharacterRole::Secondary)]);
        assert_eq!(scene.main_character_index(), Some(0));
    }

    #[test]
    fn test_main_character_none_without_cast() {
        let scene = scene_with(&[]);
        assert_eq!(scene.main_character_index(), None);
    }
}
