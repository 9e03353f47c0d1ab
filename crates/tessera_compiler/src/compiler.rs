//! Script compilation: classification, budgeting, rewriting, assembly.

use crate::{CharacterRegistry, IdentityBudget, PromptRewriter, RewrittenLine, TagOccurrenceCount};
use tessera_core::{IdentityConfig, PromptRequest, ReferenceImage, ReferenceImageProvider};
use tessera_error::TesseraResult;

/// Compiles a narrative script into one [`PromptRequest`] per story line.
///
/// The compiler owns the parsed registry and identity policy; reference
/// images are resolved through a caller-supplied provider at compile time.
/// Compilation is synchronous, pure, and atomic: any fatal error (duplicate
/// definition, undefined tag) aborts before a single request is produced.
///
/// # Examples
///
/// ```
/// use tessera_compiler::ScriptCompiler;
/// use tessera_core::{IdentityConfig, ImageMap};
///
/// let compiler = ScriptCompiler::from_general_prompt(
///     "[Amy]a young woman\n[Bob]an old man",
///     IdentityConfig::default(),
/// )
/// .unwrap();
///
/// let lines = vec!["[Amy] and [Bob] meet at dawn".to_string()];
/// let requests = compiler.compile(&lines, &ImageMap::default()).unwrap();
/// assert_eq!(requests.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptCompiler {
    registry: CharacterRegistry,
    config: IdentityConfig,
}

impl ScriptCompiler {
    /// Create a compiler from an already-parsed registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity configuration is invalid.
    pub fn new(registry: CharacterRegistry, config: IdentityConfig) -> TesseraResult<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    /// Parse the general-prompt block and create a compiler.
    ///
    /// # Errors
    ///
    /// Returns an error if a character tag is defined twice or the
    /// configuration is invalid.
    pub fn from_general_prompt(general_prompt: &str, config: IdentityConfig) -> TesseraResult<Self> {
        let registry = CharacterRegistry::parse(general_prompt)?;
        Self::new(registry, config)
    }

    /// The parsed character registry.
    pub fn registry(&self) -> &CharacterRegistry {
        &self.registry
    }

    /// The identity policy in effect.
    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }

    /// Compile the script into a lazy, restartable request sequence.
    ///
    /// All fatal work (classification, both budget passes, rewriting) runs
    /// up front; the returned iterator only assembles records, one per story
    /// line, and can be recreated by calling this method again.
    ///
    /// # Errors
    ///
    /// Returns an error if a story line references an undefined tag. No
    /// partial output is produced.
    #[tracing::instrument(skip_all, fields(lines = story_lines.len()))]
    pub fn compile_iter<'a, P: ReferenceImageProvider>(
        &'a self,
        story_lines: &[String],
        provider: &'a P,
    ) -> TesseraResult<impl Iterator<Item = PromptRequest> + 'a> {
        let occurrences: Vec<TagOccurrenceCount> = story_lines
            .iter()
            .map(|line| TagOccurrenceCount::scan(line, &self.registry))
            .collect();

        // First pass on the raw script validates tags and sets a baseline.
        let raw_budget = IdentityBudget::resolve(story_lines, &self.registry, &self.config)?;
        tracing::debug!(raw_id_length = raw_budget.id_length(), "raw budget");

        let rewriter = PromptRewriter::new(&self.registry, &self.config);
        let rewritten: Vec<Vec<RewrittenLine>> = story_lines
            .iter()
            .zip(&occurrences)
            .map(|(line, occurrence)| {
                line.split('\n')
                    .map(|segment| rewriter.rewrite_line(segment, occurrence))
                    .collect()
            })
            .collect();

        // Second pass over the rewritten prompts is final: rewriting can
        // change which lines are solo for a tag. Captions are excluded so
        // inlined tags stay gone.
        let budget = {
            let prompts: Vec<&str> = rewritten
                .iter()
                .flatten()
                .map(|line| line.prompt().as_str())
                .collect();
            IdentityBudget::resolve(&prompts, &self.registry, &self.config)?
        };
        let id_length = budget.id_length();
        tracing::debug!(id_length, "final budget");

        Ok(occurrences
            .into_iter()
            .zip(rewritten)
            .map(move |(occurrence, segments)| {
                self.assemble_request(&occurrence, &segments, id_length, provider)
            }))
    }

    /// Compile the whole script atomically into a vector of requests.
    ///
    /// # Errors
    ///
    /// Same as [`compile_iter`](Self::compile_iter).
    pub fn compile<P: ReferenceImageProvider>(
        &self,
        story_lines: &[String],
        provider: &P,
    ) -> TesseraResult<Vec<PromptRequest>> {
        Ok(self.compile_iter(story_lines, provider)?.collect())
    }

    /// Join one line's pieces into the final request record.
    fn assemble_request<P: ReferenceImageProvider>(
        &self,
        occurrence: &TagOccurrenceCount,
        segments: &[RewrittenLine],
        id_length: usize,
        provider: &P,
    ) -> PromptRequest {
        let cap = *self.config.max_simultaneous_identities();
        let marker = self.config.no_character_marker();
        let delimiter = *self.config.caption_delimiter();

        // Figure lines carry the " img" identity suffix the backend keys on.
        let figures: Vec<String> = occurrence
            .tags()
            .map(|tag| {
                if tag.is_no_character() {
                    marker.clone()
                } else {
                    match self.registry.description(tag) {
                        Some(description) => format!("{} {} img", tag, description),
                        None => tag.as_str().to_string(),
                    }
                }
            })
            .collect();

        let ref_images: Vec<ReferenceImage> = occurrence
            .character_tags()
            .filter_map(|tag| {
                let image = provider.reference_image(tag);
                if image.is_none() {
                    tracing::warn!(tag = %tag, "no reference image supplied for tag");
                }
                image
            })
            .take(cap)
            .collect();

        // Anchor prompts: the leading figure lines, identity suffix stripped.
        let anchors = occurrence
            .character_tags()
            .take(id_length)
            .filter_map(|tag| {
                self.registry
                    .description(tag)
                    .map(|description| format!("{} {}", tag, description))
            });

        let prompt_array: Vec<String> = anchors
            .chain(segments.iter().map(|segment| segment.joined(delimiter)))
            .collect();

        let general_prompt = figures
            .iter()
            .take(cap)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        PromptRequest::new(prompt_array, id_length, ref_images, general_prompt)
    }
}
