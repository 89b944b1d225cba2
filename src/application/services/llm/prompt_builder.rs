//! Prompt building functions for scene extraction requests
//!
//! Everything here is pure: the same title and minimum always produce the
//! same instruction text.

use crate::application::services::scene_schema::fields;
use crate::domain::value_objects::{CharacterRole, EnvironmentType};

/// Human-readable project label used in instructions and document headers
pub fn project_label(book_title: &str) -> String {
    format!("{} | AR Scene Pack | Outputs v1", book_title)
}

/// Build the system instruction that constrains the model's scene output
///
/// `min_scenes` is clamped to at least 1.
pub fn build_extraction_instructions(book_title: &str, min_scenes: usize) -> String {
    let min_scenes = min_scenes.max(1);
    let mut prompt = String::new();

    // Role establishment
    prompt.push_str(&format!(
        "You are the Cinematic Director for the AR project: \"{}\".\n\n",
        project_label(book_title)
    ));
    prompt.push_str(
        "YOUR GOAL: Deep read the provided text and extract the most exciting cinematic moments for Augmented Reality.\n\n",
    );

    // Scene selection
    prompt.push_str("RULES FOR SCENE SELECTION:\n");
    prompt.push_str(&format!(
        "1. Minimum Coverage: Find at least {} {} in this text chunk.\n",
        count_phrase(min_scenes),
        if min_scenes == 1 { "scene" } else { "scenes" }
    ));
    prompt.push_str(
        "2. Epic Scaling: If the text contains high drama, big reveals, or spectacle, generate as many scenes as needed. There is no upper limit.\n",
    );
    prompt.push_str("3. No Duplicates: No two scenes can share the same trigger sentence.\n\n");

    // Output content rules
    prompt.push_str("RULES FOR OUTPUTS:\n");
    prompt.push_str(
        "1. Trigger Sentences: Must be copied verbatim from the text. Choose the strongest hook line.\n",
    );
    prompt.push_str("2. Skybox Prompts:\n");
    prompt.push_str("   - POV: Ground view, center eye level.\n");
    prompt.push_str("   - Environment ONLY. No people, no animals, no props.\n");
    prompt.push_str(&format!(
        "   - Format: [{}] [Setting] [Era], [Time/Weather/Lighting], [Style: 3D watercolor].\n",
        EnvironmentType::choices()
    ));
    prompt.push_str("3. Character Descriptions:\n");
    prompt.push_str("   - Visuals ONLY. Do NOT include \"Text cue\" or dialogue.\n");
    prompt.push_str(
        "   - Style: Full-body character cutout, centered, consistent scale, high detail, no background, no shadow, no text, 4k.\n",
    );
    prompt.push_str(&format!(
        "   - Tag exactly one character per scene as \"{}\"; every other character is \"{}\".\n\n",
        CharacterRole::Main,
        CharacterRole::Secondary
    ));

    // Output shape
    prompt.push_str("OUTPUT FORMAT:\n");
    prompt.push_str("Return a valid JSON object matching this structure:\n");
    prompt.push_str(&output_template());
    prompt.push_str("\nReturn only the JSON object, with no commentary and no Markdown fences.\n");

    prompt
}

/// Build the user message carrying the chapter text, capped at `max_chars` characters
pub fn build_chapter_message(chapter_text: &str, max_chars: usize) -> String {
    format!(
        "Analyze this text chunk:\n\n{}",
        truncate_chars(chapter_text.trim(), max_chars)
    )
}

/// Cut a string to at most `max_chars` characters on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

fn output_template() -> String {
    format!(
        r#"{{
  "{scenes}": [
    {{
      "{location}": "string",
      "{chapter_beat}": "string",
      "{trigger_sentence}": "string",
      "{characters}": [ {{ "{name}": "string", "{role}": "{roles}", "{visual_description}": "string" }} ],
      "{environment}": {{ "{visual_prompt}": "string", "{environment_type}": "{environment_types}" }}
    }}
  ]
}}
"#,
        scenes = fields::SCENES,
        location = fields::LOCATION,
        chapter_beat = fields::CHAPTER_BEAT,
        trigger_sentence = fields::TRIGGER_SENTENCE,
        characters = fields::CHARACTERS,
        name = fields::NAME,
        role = fields::ROLE,
        roles = CharacterRole::choices(),
        visual_description = fields::VISUAL_DESCRIPTION,
        environment = fields::SKYBOX_ENVIRONMENT,
        visual_prompt = fields::VISUAL_PROMPT,
        environment_type = fields::ENVIRONMENT_TYPE,
        environment_types = EnvironmentType::choices(),
    )
}

/// "TWO (2)" style count, spelled out for small numbers
fn count_phrase(count: usize) -> String {
    const WORDS: [&str; 10] = [
        "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN",
    ];
    match WORDS.get(count.wrapping_sub(1)) {
        Some(word) => format!("{} ({})", word, count),
        None => count.to_string(),
    }
}
