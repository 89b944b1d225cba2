//! Enumerated scene attributes
//!
//! These enums are the single source of the allowed values: the schema
//! validator parses against them and the instruction builder lists them
//! in the output template it sends to the model.

/// Role a character plays within one scene
///
/// The role is not decorative: it decides which character receives the
/// scene's `mc01` reference and which are numbered as secondaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterRole {
    /// The focal character of the scene
    Main,
    /// Any other character present in the scene
    Secondary,
}

impl CharacterRole {
    pub const ALL: [Self; 2] = [Self::Main, Self::Secondary];

    /// Get the wire name for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Secondary => "Secondary",
        }
    }

    /// Parse a model-supplied role, ignoring case and surrounding whitespace
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(value))
    }

    /// Allowed values joined for display, e.g. `Main/Secondary`
    pub fn choices() -> String {
        Self::ALL.map(|role| role.as_str()).join("/")
    }
}

impl std::fmt::Display for CharacterRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a skybox environment is an interior or an exterior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvironmentType {
    Indoors,
    Outdoors,
}

impl EnvironmentType {
    pub const ALL: [Self; 2] = [Self::Indoors, Self::Outdoors];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indoors => "Indoors",
            Self::Outdoors => "Outdoors",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
    }

    pub fn choices() -> String {
        Self::ALL.map(|kind| kind.as_str()).join("/")
    }
}

impl std::fmt::Display for EnvironmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
