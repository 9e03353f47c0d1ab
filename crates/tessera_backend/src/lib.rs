//! Image backend boundary for the Tessera prompt compiler.
//!
//! The compiler core is pure; everything that talks to a hosted diffusion
//! endpoint lives here: the [`ImageBackend`] trait, the retry wrapper for
//! fallible invocations, and the [`StoryDiffusionClient`] HTTP
//! implementation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod diffusion;
mod retry;
mod traits;

pub use diffusion::{
    DiffusionConfig, DiffusionConfigBuilder, DiffusionRequest, StoryDiffusionClient, StylePreset,
};
pub use retry::{RetryPolicy, invoke_with_default_retry, invoke_with_retry};
pub use traits::{GeneratedImage, ImageBackend};
