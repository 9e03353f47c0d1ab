//! Core data types for the Tessera prompt compiler.
//!
//! This crate provides the foundation data types shared by the compiler and
//! the image backend boundary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod identity;
mod media;
mod request;
mod tag;
mod telemetry;

pub use identity::{IdentityConfig, IdentityConfigBuilder};
pub use media::{ImageMap, ImageSource, ReferenceImage, ReferenceImageProvider};
pub use request::PromptRequest;
pub use tag::CharacterTag;
pub use telemetry::init_telemetry;
