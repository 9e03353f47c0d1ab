//! Tessera - Character-Tagged Prompt Compiler
//!
//! Tessera compiles a free-form, multi-character narrative script into a
//! bounded set of image-generation requests for a text-to-image backend
//! that can anchor at most two character identities per image.
//!
//! # Features
//!
//! - **Character Registry**: `[Name]description` definitions parsed once per
//!   script, definition order preserved
//! - **Tag Scanning**: per-line occurrence counts with a `[NC]` sentinel for
//!   tagless lines
//! - **Identity Budgeting**: two-pass `id_length` resolution, clamped to the
//!   backend cap
//! - **Prompt Rewriting**: excess tags spelled out with each character's own
//!   description
//! - **Backend Boundary**: `ImageBackend` trait, StoryDiffusion HTTP client,
//!   bounded retry on decode/validation failures
//!
//! # Quick Start
//!
//! ```rust
//! use tessera::{IdentityConfig, ImageMap, ScriptCompiler};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let compiler = ScriptCompiler::from_general_prompt(
//!         "[Amy]a young woman\n[Bob]an old man",
//!         IdentityConfig::default(),
//!     )?;
//!
//!     let script = vec![
//!         "[Amy] tends the garden".to_string(),
//!         "[Amy] and [Bob] meet at dawn".to_string(),
//!     ];
//!     for request in compiler.compile_iter(&script, &ImageMap::default())? {
//!         println!("{} prompts", request.prompt_array().len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Tessera is organized as a workspace with focused crates:
//!
//! - `tessera_core` - Core data types (CharacterTag, PromptRequest, etc.)
//! - `tessera_error` - Error types
//! - `tessera_compiler` - The compiler pipeline
//! - `tessera_backend` - Image backend trait, HTTP client, retry wrapper
//!
//! This crate (`tessera`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use tessera_backend::*;
pub use tessera_compiler::*;
pub use tessera_core::*;
pub use tessera_error::*;
