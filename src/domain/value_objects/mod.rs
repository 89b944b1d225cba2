//! Value objects - Immutable objects defined by their attributes

mod ids;
mod scene_kinds;
mod scene_ref;
mod settings;

pub use ids::RunId;
pub use scene_kinds::{CharacterRole, EnvironmentType};
pub use scene_ref::{SceneId, SECONDARY_REF_BASE};
pub use settings::{ExtractionSettings, NegativePromptPolicy, SKYBOX_NEGATIVE_PROMPT};
