//! Scene pack export
//!
//! Renders sequenced scenes into the three hand-off documents: trigger
//! sentences, skybox environment prompts and character prompts.

mod markdown;

pub use markdown::MarkdownRenderer;
