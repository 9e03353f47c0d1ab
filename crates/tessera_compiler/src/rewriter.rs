//! Line rewriting to stay within the backend identity cap.

use crate::{CharacterRegistry, TagOccurrenceCount};
use regex::Regex;
use std::sync::LazyLock;
use tessera_core::IdentityConfig;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("valid pattern"));

/// One rewritten prompt segment paired with its original caption.
///
/// Downstream consumers display the caption separately from the
/// model-facing prompt; [`joined`](RewrittenLine::joined) produces the wire
/// form with the caption delimiter.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct RewrittenLine {
    /// The model-facing prompt, tags capped and marker applied
    prompt: String,
    /// The original unmodified text
    caption: String,
}

impl RewrittenLine {
    /// Join prompt and caption with the configured delimiter.
    pub fn joined(&self, delimiter: char) -> String {
        format!("{}{}{}", self.prompt, delimiter, self.caption)
    }
}

/// Rewrites story lines so at most the allowed number of bracket tags
/// remain; excess tags are spelled out with the character's own description
/// text.
///
/// The rewrite is a pure transformation: each call depends only on the line
/// text and that line's own occurrence record, passed in explicitly. It is
/// idempotent on lines already within the cap.
///
/// Malformed bracket syntax degrades to "no match" and is treated as the
/// no-tag case, never an error: the policy favors producing usable output
/// over strict validation.
///
/// # Examples
///
/// ```
/// use tessera_compiler::{CharacterRegistry, PromptRewriter, TagOccurrenceCount};
/// use tessera_core::IdentityConfig;
///
/// let registry: CharacterRegistry = "[Amy]a young woman\n[Bob]an old man"
///     .parse()
///     .unwrap();
/// let config = IdentityConfig::default();
/// let rewriter = PromptRewriter::new(&registry, &config);
///
/// let line = "A quiet morning in the village.";
/// let occurrence = TagOccurrenceCount::scan(line, &registry);
/// let rewritten = rewriter.rewrite_line(line, &occurrence);
/// assert!(rewritten.prompt().starts_with("[NC]"));
/// ```
#[derive(Debug)]
pub struct PromptRewriter<'a> {
    registry: &'a CharacterRegistry,
    config: &'a IdentityConfig,
}

impl<'a> PromptRewriter<'a> {
    /// Create a rewriter over a parsed registry and identity policy.
    pub fn new(registry: &'a CharacterRegistry, config: &'a IdentityConfig) -> Self {
        Self { registry, config }
    }

    /// Rewrite one prompt segment.
    ///
    /// `occurrence` is the occurrence record of the story line the segment
    /// belongs to: its first `cap` tags in definition order are the
    /// identities kept as bracket tags. That is the same scope the assembler
    /// uses for figure lines and reference images, so a surviving tag always
    /// has a matching figure entry.
    ///
    /// Steps, in order:
    /// 1. every tag outside the line's identity scope is inlined with its
    ///    own description everywhere it occurs;
    /// 2. a segment left without any bracket token is prefixed with the
    ///    no-character marker;
    /// 3. the original text is appended as caption.
    pub fn rewrite_line(&self, text: &str, occurrence: &TagOccurrenceCount) -> RewrittenLine {
        let cap = *self.config.max_simultaneous_identities();
        let marker = self.config.no_character_marker().as_str();

        let mut prompt = text.to_string();

        // Tags beyond the scope lose their identity slot on every mention.
        for tag in occurrence.character_tags().skip(cap) {
            if let Some(description) = self.registry.description(tag) {
                tracing::debug!(tag = %tag, "inlining out-of-scope tag");
                prompt = prompt.replace(tag.as_str(), description);
            }
        }

        // Every rewritten segment begins with a tag or the marker.
        if !TOKEN.is_match(&prompt) {
            prompt = format!("{marker}{prompt}");
        }

        RewrittenLine {
            prompt,
            caption: text.to_string(),
        }
    }
}
