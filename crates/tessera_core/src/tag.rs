//! Bracketed character tag identifiers.

use serde::{Deserialize, Serialize};

/// A bracketed character identifier, e.g. `[Amy]`.
///
/// Tags are stored in their bracketed wire form so that substring scanning in
/// story lines needs no re-formatting. The `[NC]` sentinel marks a line with
/// no character identity to anchor.
///
/// # Examples
///
/// ```
/// use tessera_core::CharacterTag;
///
/// let amy = CharacterTag::new("Amy");
/// assert_eq!(amy.as_str(), "[Amy]");
/// assert_eq!(amy.name(), "Amy");
///
/// let nc = CharacterTag::no_character();
/// assert!(nc.is_no_character());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct CharacterTag(String);

impl CharacterTag {
    /// The wire form of the no-character sentinel.
    pub const NO_CHARACTER: &'static str = "[NC]";

    /// Create a tag from a bare character name, adding brackets.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(format!("[{}]", name.as_ref()))
    }

    /// Create a tag from text already in bracketed form.
    ///
    /// The caller is responsible for the brackets; this is the constructor
    /// used when parsing author-supplied definitions verbatim.
    pub fn from_bracketed(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The `[NC]` sentinel tag.
    pub fn no_character() -> Self {
        Self(Self::NO_CHARACTER.to_string())
    }

    /// Whether this tag is the no-character sentinel.
    pub fn is_no_character(&self) -> bool {
        self.0 == Self::NO_CHARACTER
    }

    /// The bracketed wire form, e.g. `[Amy]`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bare name without brackets, e.g. `Amy`.
    pub fn name(&self) -> &str {
        self.0.trim_start_matches('[').trim_end_matches(']')
    }
}

impl AsRef<str> for CharacterTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
