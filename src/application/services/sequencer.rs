//! Sequencer - Global scene numbering and asset reference naming
//!
//! Takes every chapter's accepted scenes in document order and assigns the
//! identifiers that tie the three output documents together. The numbering
//! is a single ordered pass over the flattened scenes; no counter outlives
//! the call.

use crate::domain::entities::{CharacterRef, ChapterResult, Scene, SequencedScene};
use crate::domain::value_objects::{SceneId, SECONDARY_REF_BASE};

/// Number all scenes of a book
///
/// Chapters and the scenes within them keep the order they arrive in. Failed
/// chapters contribute nothing and reserve no index. Never fails.
pub fn sequence(chapter_results: Vec<ChapterResult>) -> Vec<SequencedScene> {
    chapter_results
        .into_iter()
        .flat_map(|result| {
            let chapter_index = result.chapter_index;
            result
                .scenes
                .into_iter()
                .map(move |scene| (chapter_index, scene))
        })
        .zip(1u32..)
        .map(|((chapter_index, scene), global_index)| {
            sequence_scene(global_index, chapter_index, scene)
        })
        .collect()
}

fn sequence_scene(global_index: u32, chapter_index: usize, scene: Scene) -> SequencedScene {
    let scene_id = SceneId::from_index(global_index);
    let main_index = scene.main_character_index();

    let main_ref = main_index.map(|character_index| CharacterRef {
        reference: scene_id.main_ref(),
        character_index,
    });

    // Everyone but the main character, in the order the model listed them
    let secondary_refs = (0..scene.characters.len())
        .filter(|i| Some(*i) != main_index)
        .zip(SECONDARY_REF_BASE..)
        .map(|(character_index, position)| CharacterRef {
            reference: scene_id.secondary_ref(position),
            character_index,
        })
        .collect();

    SequencedScene {
        global_index,
        scene_id,
        chapter_index,
        background_ref: scene_id.background_ref(),
        main_ref,
        secondary_refs,
        scene,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ChapterError, Character, Environment, SchemaViolation};
    use crate::domain::value_objects::{CharacterRole, EnvironmentType};

    fn scene(trigger: &str, cast: &[(&str, CharacterRole)]) -> Scene {
        cast.iter().fold(
            Scene::new(
                "Hundred Acre Wood",
                "Part 1",
                trigger,
                Environment::new("forest clearing", EnvironmentType::Outdoors),
            ),
            |scene, (name, role)| scene.with_character(Character::new(*name, *role, "visual")),
        )
    }

    fn chapter(index: usize, scenes: Vec<Scene>) -> ChapterResult {
        ChapterResult::accepted(index, scenes)
    }

    fn refs(scene: &SequencedScene) -> (Option<(String, String)>, Vec<(String, String)>) {
        let name = |r: &CharacterRef| scene.scene.characters[r.character_index].name.clone();
        (
            scene.main_ref.as_ref().map(|r| (r.reference.clone(), name(r))),
            scene
                .secondary_refs
                .iter()
                .map(|r| (r.reference.clone(), name(r)))
                .collect(),
        )
    }

    #[test]
    fn test_two_chapter_scenario() {
        use CharacterRole::*;

        let results = vec![
            chapter(1, vec![scene("a", &[("Pooh", Main)]), scene("b", &[("Pooh", Main)])]),
            chapter(
                2,
                vec![scene(
                    "c",
                    &[("Pooh", Main), ("Piglet", Secondary), ("Owl", Secondary)],
                )],
            ),
        ];

        let sequenced = sequence(results);

        let ids: Vec<String> = sequenced.iter().map(|s| s.scene_id.to_string()).collect();
        assert_eq!(ids, vec!["ch01", "ch02", "ch03"]);

        let third = &sequenced[2];
        assert_eq!(third.chapter_index, 2);
        assert_eq!(third.background_ref, "ch03bg01");
        let (main, secondary) = refs(third);
        assert_eq!(main, Some(("ch03mc01".to_string(), "Pooh".to_string())));
        assert_eq!(
            secondary,
            vec![
                ("ch03sc01".to_string(), "Piglet".to_string()),
                ("ch03sc02".to_string(), "Owl".to_string()),
            ]
        );
    }

    #[test]
    fn test_tagged_main_is_not_first() {
        use CharacterRole::*;

        let sequenced = sequence(vec![chapter(
            1,
            vec![scene("a", &[("B", Secondary), ("A", Main), ("C", Secondary)])],
        )]);

        let (main, secondary) = refs(&sequenced[0]);
        assert_eq!(main, Some(("ch01mc01".to_string(), "A".to_string())));
        assert_eq!(
            secondary,
            vec![
                ("ch01sc01".to_string(), "B".to_string()),
                ("ch01sc02".to_string(), "C".to_string()),
            ]
        );
    }

    #[test]
    fn test_main_fallback_to_first_character() {
        use CharacterRole::*;

        let sequenced = sequence(vec![chapter(
            1,
            vec![scene("a", &[("B", Secondary), ("C", Secondary)])],
        )]);

        let (main, secondary) = refs(&sequenced[0]);
        assert_eq!(main, Some(("ch01mc01".to_string(), "B".to_string())));
        assert_eq!(secondary, vec![("ch01sc01".to_string(), "C".to_string())]);
    }

    #[test]
    fn test_second_main_is_numbered_as_secondary() {
        use CharacterRole::*;

        let sequenced = sequence(vec![chapter(
            1,
            vec![scene("a", &[("A", Main), ("B", Main), ("C", Secondary)])],
        )]);

        let (main, secondary) = refs(&sequenced[0]);
        assert_eq!(main, Some(("ch01mc01".to_string(), "A".to_string())));
        assert_eq!(
            secondary,
            vec![
                ("ch01sc01".to_string(), "B".to_string()),
                ("ch01sc02".to_string(), "C".to_string()),
            ]
        );
    }

    #[test]
    fn test_scene_without_characters_has_no_character_refs() {
        let sequenced = sequence(vec![chapter(1, vec![scene("a", &[])])]);

        assert_eq!(sequenced.len(), 1);
        assert_eq!(sequenced[0].main_ref, None);
        assert!(sequenced[0].secondary_refs.is_empty());
        assert_eq!(sequenced[0].background_ref, "ch01bg01");
    }

    #[test]
    fn test_failed_chapter_reserves_no_index() {
        use CharacterRole::*;

        let failed = ChapterResult::failed(
            2,
            ChapterError::SchemaViolation(SchemaViolation::new(
                "scenes[0].characters",
                "missing required field",
            )),
        );
        let results = vec![
            chapter(1, vec![scene("a", &[("Pooh", Main)])]),
            failed,
            chapter(3, vec![scene("b", &[("Pooh", Main)])]),
        ];

        let sequenced = sequence(results);

        assert_eq!(sequenced.len(), 2);
        assert_eq!(sequenced[1].global_index, 2);
        assert_eq!(sequenced[1].scene_id.to_string(), "ch02");
        assert_eq!(sequenced[1].chapter_index, 3);
    }

    #[test]
    fn test_indices_are_dense_and_ordered() {
        use CharacterRole::*;

        let counts = [3usize, 0, 5, 1, 2];
        let results: Vec<ChapterResult> = counts
            .iter()
            .enumerate()
            .map(|(i, count)| {
                chapter(
                    i + 1,
                    (0..*count)
                        .map(|s| scene(&format!("{}-{}", i + 1, s), &[("Pooh", Main)]))
                        .collect(),
                )
            })
            .collect();

        let sequenced = sequence(results);

        assert_eq!(sequenced.len(), counts.iter().sum::<usize>());
        let indices: Vec<u32> = sequenced.iter().map(|s| s.global_index).collect();
        assert_eq!(indices, (1..=sequenced.len() as u32).collect::<Vec<_>>());

        let triggers: Vec<&str> = sequenced
            .iter()
            .map(|s| s.scene.trigger_sentence.as_str())
            .collect();
        assert_eq!(
            triggers,
            vec!["1-0", "1-1", "1-2", "3-0", "3-1", "3-2", "3-3", "3-4", "4-0", "5-0", "5-1"]
        );
    }

    #[test]
    fn test_cross_chapter_duplicates_are_kept() {
        use CharacterRole::*;

        let sequenced = sequence(vec![
            chapter(1, vec![scene("same", &[("Pooh", Main)])]),
            chapter(2, vec![scene("same", &[("Pooh", Main)])]),
        ]);

        assert_eq!(sequenced.len(), 2);
        assert_eq!(sequenced[1].scene_id.to_string(), "ch02");
    }

    #[test]
    fn test_hundredth_scene_id() {
        use CharacterRole::*;

        let scenes = (0..100)
            .map(|i| scene(&i.to_string(), &[("Pooh", Main)]))
            .collect();
        let sequenced = sequence(vec![chapter(1, scenes)]);

        let last = &sequenced[99];
        assert_eq!(last.scene_id.to_string(), "ch100");
        assert_eq!(last.background_ref, "ch100bg01");
        assert_eq!(last.main_ref.as_ref().unwrap().reference, "ch100mc01");
    }

    #[test]
    fn test_cast_keeps_model_order() {
        use CharacterRole::*;

        let sequenced = sequence(vec![chapter(
            1,
            vec![scene("a", &[("B", Secondary), ("A", Main), ("C", Secondary)])],
        )]);

        let cast: Vec<(&str, &str)> = sequenced[0]
            .cast()
            .into_iter()
            .map(|(reference, c)| (reference, c.name.as_str()))
            .collect();
        assert_eq!(
            cast,
            vec![("ch01sc01", "B"), ("ch01mc01", "A"), ("ch01sc02", "C")]
        );
        assert_eq!(sequenced[0].main_character().map(|c| c.name.as_str()), Some("A"));
    }

    #[test]
    fn test_empty_input() {
        assert!(sequence(Vec::new()).is_empty());
    }
}
