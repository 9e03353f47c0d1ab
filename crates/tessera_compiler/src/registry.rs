//! Ordered character definitions parsed from the general prompt.

use std::str::FromStr;
use tessera_core::CharacterTag;
use tessera_error::{CompilerError, CompilerErrorKind};

/// One parsed character definition.
///
/// The description is the text used when a tag has to be spelled out inline;
/// the caption is display-only data the author appended after the last `#`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, derive_getters::Getters)]
pub struct CharacterEntry {
    /// The bracketed tag, e.g. `[Amy]`
    tag: CharacterTag,
    /// Description text, caption suffix stripped
    description: String,
    /// Display-only caption, if the definition carried one
    caption: Option<String>,
}

/// Ordered mapping from character tag to description.
///
/// Definition order is preserved: the order characters were first defined
/// becomes the priority order when truncating to the identity cap.
///
/// # Examples
///
/// ```
/// use tessera_compiler::CharacterRegistry;
///
/// let registry: CharacterRegistry = "[Amy]a young woman\n[Bob]an old man"
///     .parse()
///     .unwrap();
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.entries()[0].tag().name(), "Amy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct CharacterRegistry {
    entries: Vec<CharacterEntry>,
}

impl CharacterRegistry {
    /// Parses the general-prompt block, one `[Tag]Description[#Caption]` per
    /// line.
    ///
    /// Lines without both `[` and `]` are not definitions and are ignored.
    /// Caption text after the last `#` is stripped from the description.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerErrorKind::DuplicateCharacter`] if a tag is defined
    /// twice; compilation of the whole script aborts.
    #[tracing::instrument(skip_all)]
    pub fn parse(general_prompt: &str) -> Result<Self, CompilerError> {
        let mut entries: Vec<CharacterEntry> = Vec::new();

        for line in general_prompt.lines() {
            let (Some(start), Some(end)) = (line.find('['), line.find(']')) else {
                continue;
            };
            if end < start {
                continue;
            }

            let tag = CharacterTag::from_bracketed(&line[start..=end]);
            let rest = &line[end + 1..];
            let (description, caption) = match rest.rfind('#') {
                Some(pos) => (rest[..pos].to_string(), Some(rest[pos + 1..].to_string())),
                None => (rest.to_string(), None),
            };

            if entries.iter().any(|e| e.tag == tag) {
                return Err(CompilerError::new(CompilerErrorKind::DuplicateCharacter(
                    tag.as_str().to_string(),
                )));
            }
            entries.push(CharacterEntry {
                tag,
                description,
                caption,
            });
        }

        tracing::debug!(characters = entries.len(), "parsed character registry");
        Ok(Self { entries })
    }

    /// Number of defined characters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no characters are defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The definitions in definition order.
    pub fn entries(&self) -> &[CharacterEntry] {
        &self.entries
    }

    /// Tags in definition order.
    pub fn tags(&self) -> impl Iterator<Item = &CharacterTag> {
        self.entries.iter().map(|e| &e.tag)
    }

    /// Whether the tag is defined.
    pub fn contains(&self, tag: &CharacterTag) -> bool {
        self.entries.iter().any(|e| &e.tag == tag)
    }

    /// The description for a tag, caption stripped.
    pub fn description(&self, tag: &CharacterTag) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| &e.tag == tag)
            .map(|e| e.description.as_str())
    }

    /// The zero-based definition position of a tag.
    pub fn priority(&self, tag: &CharacterTag) -> Option<usize> {
        self.entries.iter().position(|e| &e.tag == tag)
    }
}

impl FromStr for CharacterRegistry {
    type Err = CompilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
