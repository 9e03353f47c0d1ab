//! Identity anchor budget resolution.

use crate::CharacterRegistry;
use regex::Regex;
use std::sync::LazyLock;
use tessera_core::{CharacterTag, IdentityConfig};
use tessera_error::{CompilerError, CompilerErrorKind};

/// Bracketed token pattern, non-greedy like the backend's own parser.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("valid pattern"));

/// Sentinel for "no character constrains the budget yet".
const UNBOUNDED: usize = usize::MAX;

/// The resolved identity anchor budget for one script.
///
/// `id_length` is the minimum, across all characters that appear at all, of
/// the number of lines where that character is the *sole* tag, clamped to
/// the backend's identity cap. A character that appears but never alone
/// forces `id_length` to zero for the whole script — conservative behavior,
/// not an error.
///
/// The resolver runs twice per compile: once on the raw script and once on
/// the rewritten prompts, since rewriting can change which lines are solo.
///
/// # Examples
///
/// ```
/// use tessera_compiler::{CharacterRegistry, IdentityBudget};
/// use tessera_core::IdentityConfig;
///
/// let registry: CharacterRegistry = "[Amy]a young woman\n[Bob]an old man"
///     .parse()
///     .unwrap();
/// let config = IdentityConfig::default();
///
/// let lines = vec![
///     "[Amy] tends the garden".to_string(),
///     "[Bob] reads by the fire".to_string(),
///     "[Amy] and [Bob] meet at dawn".to_string(),
/// ];
/// let budget = IdentityBudget::resolve(&lines, &registry, &config).unwrap();
/// assert_eq!(budget.id_length(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityBudget {
    id_length: usize,
    anchors: Vec<(CharacterTag, Vec<usize>)>,
}

impl IdentityBudget {
    /// Fold per-line tag occurrences into the global anchor budget.
    ///
    /// Two immutable passes: first the full per-line classification, then
    /// the fold into solo counts. Nothing accumulates across line
    /// iterations.
    ///
    /// # Errors
    ///
    /// Returns [`CompilerErrorKind::MissingDescription`] if a well-formed
    /// bracketed tag appears in a line without a registry definition (the
    /// no-character marker is exempt).
    #[tracing::instrument(skip_all, fields(lines = prompts.len()))]
    pub fn resolve<I: AsRef<str>>(
        prompts: &[I],
        registry: &CharacterRegistry,
        config: &IdentityConfig,
    ) -> Result<Self, CompilerError> {
        // Pass 1: classify every line.
        let mut present_by_line: Vec<Vec<usize>> = Vec::with_capacity(prompts.len());
        for (line_index, prompt) in prompts.iter().enumerate() {
            let line = prompt.as_ref();
            for token in TOKEN.find_iter(line) {
                let token = token.as_str();
                if token == config.no_character_marker() {
                    continue;
                }
                let tag = CharacterTag::from_bracketed(token);
                if !registry.contains(&tag) {
                    return Err(CompilerError::new(CompilerErrorKind::MissingDescription {
                        tag: token.to_string(),
                        line_index,
                    }));
                }
            }

            let present: Vec<usize> = registry
                .tags()
                .enumerate()
                .filter_map(|(idx, tag)| line.contains(tag.as_str()).then_some(idx))
                .collect();
            present_by_line.push(present);
        }

        // Pass 2: fold classifications into solo-appearance lists.
        let mut solo_by_tag: Vec<Vec<usize>> = vec![Vec::new(); registry.len()];
        let mut appears: Vec<bool> = vec![false; registry.len()];
        for (line_index, present) in present_by_line.iter().enumerate() {
            for &idx in present {
                appears[idx] = true;
            }
            if let [only] = present.as_slice() {
                solo_by_tag[*only].push(line_index);
            }
        }

        let id_length = appears
            .iter()
            .zip(&solo_by_tag)
            .filter(|(appears, _)| **appears)
            .fold(UNBOUNDED, |acc, (_, solo)| acc.min(solo.len()))
            .min(*config.max_simultaneous_identities());

        let anchors = registry
            .tags()
            .enumerate()
            .filter(|(idx, _)| appears[*idx])
            .map(|(idx, tag)| {
                let mut indices = solo_by_tag[idx].clone();
                indices.truncate(id_length);
                (tag.clone(), indices)
            })
            .collect();

        tracing::debug!(id_length, "resolved identity budget");
        Ok(Self { id_length, anchors })
    }

    /// The global anchor count, always within `{0, 1, .., cap}`.
    pub fn id_length(&self) -> usize {
        self.id_length
    }

    /// Per character, the first `id_length` solo line indices in script
    /// order. Only characters that appear at all are listed.
    pub fn anchors(&self) -> &[(CharacterTag, Vec<usize>)] {
        &self.anchors
    }

    /// Anchor line indices for one character, if it appears in the script.
    pub fn anchor_indices(&self, tag: &CharacterTag) -> Option<&[usize]> {
        self.anchors
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, v)| v.as_slice())
    }
}
