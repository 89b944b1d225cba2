//! Markdown rendering of the three scene pack documents

use crate::application::ports::outbound::{
    DocumentRendererPort, RenderedDocument, RenderedDocuments,
};
use crate::application::services::llm::project_label;
use crate::domain::entities::SequencedScene;

/// Renders the trigger, environment and character documents as Markdown
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRendererPort for MarkdownRenderer {
    fn render(&self, book_title: &str, scenes: &[SequencedScene]) -> RenderedDocuments {
        let slug = slugify(book_title);
        let document = |kind: &str, content: String| RenderedDocument {
            file_name: format!("{}_{}.md", slug, kind),
            content,
        };

        RenderedDocuments {
            trigger_sentences: document(
                "trigger_sentences",
                render_trigger_sentences(book_title, scenes),
            ),
            environment_prompts: document(
                "environment_prompts",
                render_environment_prompts(book_title, scenes),
            ),
            character_prompts: document(
                "character_prompts",
                render_character_prompts(book_title, scenes),
            ),
        }
    }
}

fn header(book_title: &str, document_title: &str, scene_count: usize) -> String {
    format!(
        "# {}\n\n## {}\n\n_{} scene(s)_\n\n",
        project_label(book_title),
        document_title,
        scene_count
    )
}

fn scene_heading(scene: &SequencedScene) -> String {
    format!(
        "### {} - {} ({})\n\n",
        scene.scene_id, scene.scene.location, scene.scene.chapter_beat
    )
}

fn render_trigger_sentences(book_title: &str, scenes: &[SequencedScene]) -> String {
    let mut out = header(book_title, "Trigger Sentences", scenes.len());
    for scene in scenes {
        out.push_str(&scene_heading(scene));
        out.push_str(&format!("- **Chapter:** {}\n", scene.chapter_index));
        if let Some(main) = scene.main_character() {
            out.push_str(&format!("- **Main character:** {}\n", main.name));
        }
        out.push_str(&format!("- **Trigger:** \"{}\"\n\n", scene.scene.trigger_sentence));
    }
    out
}

fn render_environment_prompts(book_title: &str, scenes: &[SequencedScene]) -> String {
    let mut out = header(book_title, "Skybox Environment Prompts", scenes.len());
    for scene in scenes {
        let environment = &scene.scene.environment;
        out.push_str(&scene_heading(scene));
        out.push_str(&format!("- **File:** `{}`\n", scene.background_ref));
        out.push_str(&format!("- **Type:** {}\n", environment.environment_type));
        out.push_str(&format!("- **Prompt:** {}\n", environment.visual_prompt));
        out.push_str(&format!(
            "- **Negative prompt:** {}\n\n",
            environment.negative_prompt()
        ));
    }
    out
}

fn render_character_prompts(book_title: &str, scenes: &[SequencedScene]) -> String {
    let mut out = header(book_title, "Character Prompts", scenes.len());
    for scene in scenes {
        out.push_str(&scene_heading(scene));
        let cast = scene.cast();
        if cast.is_empty() {
            out.push_str("_No characters._\n\n");
            continue;
        }
        for (reference, character) in cast {
            out.push_str(&format!(
                "- **`{}`** {} ({}): {}\n",
                reference, character.name, character.role, character.visual_description
            ));
        }
        out.push('\n');
    }
    out
}

/// Lowercase ASCII slug; runs of other characters collapse to one `-`
pub fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "book".to_string()
    } else {
        slug.to_string()
    }
}
