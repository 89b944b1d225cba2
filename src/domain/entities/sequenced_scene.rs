//! Sequenced scene - A validated scene with its global number and asset refs

use super::{Character, Scene};
use crate::domain::value_objects::SceneId;

/// Asset reference for one character of a scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRef {
    /// Reference name, e.g. `ch03mc01` or `ch03sc02`
    pub reference: String,
    /// Position of the character in `Scene::characters`
    pub character_index: usize,
}

/// A scene placed in final document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencedScene {
    /// 1-based, dense across the whole book
    pub global_index: u32,
    pub scene_id: SceneId,
    /// Chapter the scene was extracted from
    pub chapter_index: usize,
    pub background_ref: String,
    pub main_ref: Option<CharacterRef>,
    pub secondary_refs: Vec<CharacterRef>,
    pub scene: Scene,
}

impl SequencedScene {
    /// Every character paired with its reference, in the order the model listed them
    pub fn cast(&self) -> Vec<(&str, &Character)> {
        let mut cast: Vec<(usize, &str, &Character)> = self
            .main_ref
            .iter()
            .chain(self.secondary_refs.iter())
            .filter_map(|r| {
                self.scene
                    .characters
                    .get(r.character_index)
                    .map(|c| (r.character_index, r.reference.as_str(), c))
            })
            .collect();
        cast.sort_by_key(|(index, _, _)| *index);
        cast.into_iter().map(|(_, reference, c)| (reference, c)).collect()
    }

    pub fn main_character(&self) -> Option<&Character> {
        self.main_ref
            .as_ref()
            .and_then(|r| self.scene.characters.get(r.character_index))
    }
}
