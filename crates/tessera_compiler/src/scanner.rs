//! Per-line character tag classification.

use crate::CharacterRegistry;
use tessera_core::CharacterTag;

/// Occurrence counts of known character tags within one story line.
///
/// Counts are kept in registry (definition) order. A line in which no known
/// tag appears is represented by the single sentinel entry `{[NC]: 1}`.
///
/// # Examples
///
/// ```
/// use tessera_compiler::{CharacterRegistry, TagOccurrenceCount};
/// use tessera_core::CharacterTag;
///
/// let registry: CharacterRegistry = "[Amy]a young woman\n[Bob]an old man"
///     .parse()
///     .unwrap();
///
/// let counts = TagOccurrenceCount::scan("[Amy] and [Bob] meet at dawn", &registry);
/// assert_eq!(counts.count(&CharacterTag::new("Amy")), 1);
/// assert_eq!(counts.count(&CharacterTag::new("Bob")), 1);
///
/// let quiet = TagOccurrenceCount::scan("A quiet morning in the village.", &registry);
/// assert!(quiet.is_no_character());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOccurrenceCount {
    counts: Vec<(CharacterTag, usize)>,
}

impl TagOccurrenceCount {
    /// Scan one story line for exact substring occurrences of each known tag.
    ///
    /// Pure and order-independent: scanning all lines of a script produces
    /// the full per-script classification consumed by the budget resolver.
    pub fn scan(line: &str, registry: &CharacterRegistry) -> Self {
        let counts: Vec<(CharacterTag, usize)> = registry
            .tags()
            .filter_map(|tag| {
                let n = line.matches(tag.as_str()).count();
                (n > 0).then(|| (tag.clone(), n))
            })
            .collect();

        if counts.is_empty() {
            return Self {
                counts: vec![(CharacterTag::no_character(), 1)],
            };
        }
        Self { counts }
    }

    /// Whether this line carries the no-character sentinel.
    pub fn is_no_character(&self) -> bool {
        self.counts.len() == 1 && self.counts[0].0.is_no_character()
    }

    /// Occurrence count for a tag (zero if absent).
    pub fn count(&self, tag: &CharacterTag) -> usize {
        self.counts
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// All entries in registry order (the sentinel entry for tagless lines).
    pub fn counts(&self) -> &[(CharacterTag, usize)] {
        &self.counts
    }

    /// Tags present on this line, sentinel included, in registry order.
    pub fn tags(&self) -> impl Iterator<Item = &CharacterTag> {
        self.counts.iter().map(|(t, _)| t)
    }

    /// Real character tags present on this line, sentinel excluded.
    pub fn character_tags(&self) -> impl Iterator<Item = &CharacterTag> {
        self.tags().filter(|t| !t.is_no_character())
    }

    /// Number of distinct real characters on this line.
    pub fn distinct_characters(&self) -> usize {
        self.character_tags().count()
    }

    /// Sum of all occurrence counts.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}
