//! Character-tagged prompt compiler.
//!
//! Turns a multi-character narrative script into one [`PromptRequest`] per
//! story line for a text-to-image backend that can anchor at most two
//! character identities per image.
//!
//! The pipeline, leaves first:
//! - [`CharacterRegistry`] parses the general-prompt block once per script.
//! - [`TagOccurrenceCount`] classifies each story line by tag occurrences.
//! - [`IdentityBudget`] folds the classifications into the global `id_length`.
//! - [`PromptRewriter`] rewrites each line to stay within the identity cap.
//! - [`ScriptCompiler`] assembles the final request records.
//!
//! Every stage is a pure function of its inputs; compilation of one script
//! shares no state with any other compile call.
//!
//! [`PromptRequest`]: tessera_core::PromptRequest

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod budget;
mod compiler;
mod registry;
mod rewriter;
mod scanner;

pub use budget::IdentityBudget;
pub use compiler::ScriptCompiler;
pub use registry::{CharacterEntry, CharacterRegistry};
pub use rewriter::{PromptRewriter, RewrittenLine};
pub use scanner::TagOccurrenceCount;
