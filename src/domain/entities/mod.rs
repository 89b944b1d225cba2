//! Domain entities - Scene records and the results built around them

mod chapter;
mod scene;
mod sequenced_scene;

pub use chapter::{ChapterError, ChapterResult, CoverageWarning, SchemaViolation};
pub use scene::{Character, Environment, Scene};
pub use sequenced_scene::{CharacterRef, SequencedScene};
