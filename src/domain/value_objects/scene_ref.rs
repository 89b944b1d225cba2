//! Scene identifiers and the reference names derived from them
//!
//! A scene id is `ch` followed by the 1-based global scene index, zero-padded
//! to at least two digits (`ch01`, `ch12`, `ch100`). Every asset reference
//! that ties the three output documents together is the scene id plus a
//! fixed suffix.

/// First index used when numbering secondary characters (`sc01`)
pub const SECONDARY_REF_BASE: u32 = 1;

/// Sequence identifier assigned to a scene in final document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u32);

impl SceneId {
    /// Build the id for a 1-based global scene index
    pub fn from_index(global_index: u32) -> Self {
        Self(global_index)
    }

    /// Background (skybox) asset reference, e.g. `ch01bg01`
    pub fn background_ref(&self) -> String {
        format!("{}bg01", self)
    }

    /// Main character asset reference, e.g. `ch01mc01`
    pub fn main_ref(&self) -> String {
        format!("{}mc01", self)
    }

    /// Secondary character asset reference for a 1-based position, e.g. `ch01sc02`
    pub fn secondary_ref(&self, position: u32) -> String {
        format!("{}sc{:02}", self, position)
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ch{:02}", self.0)
    }
}
