//! Reference image payloads for identity anchoring.

use crate::CharacterTag;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where an image payload is sourced from.
///
/// # Examples
///
/// ```
/// use tessera_core::ImageSource;
///
/// let base64 = ImageSource::Base64("iVBORw0KGgo...".to_string());
/// let binary = ImageSource::Binary(vec![0x89, 0x50, 0x4E, 0x47]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSource {
    /// Base64-encoded content
    Base64(String),
    /// Raw binary data
    Binary(Vec<u8>),
}

/// An opaque image payload anchoring one character's identity.
///
/// Reference images are supplied by the caller, never created by the
/// compiler.
///
/// # Examples
///
/// ```
/// use tessera_core::{CharacterTag, ImageSource, ReferenceImage};
///
/// let img = ReferenceImage::new(CharacterTag::new("Amy"), ImageSource::Base64("...".into()));
/// assert_eq!(img.tag().name(), "Amy");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ReferenceImage {
    /// The character this image anchors
    tag: CharacterTag,
    /// The image payload
    source: ImageSource,
}

impl ReferenceImage {
    /// Create a reference image for a character.
    pub fn new(tag: CharacterTag, source: ImageSource) -> Self {
        Self { tag, source }
    }
}

/// Supplies reference images keyed by character tag.
///
/// The compiler resolves images through this trait; it does not fetch or
/// decode anything itself.
pub trait ReferenceImageProvider {
    /// Look up the reference image for a tag, if one was supplied.
    fn reference_image(&self, tag: &CharacterTag) -> Option<ReferenceImage>;
}

/// HashMap-backed [`ReferenceImageProvider`].
///
/// # Examples
///
/// ```
/// use tessera_core::{CharacterTag, ImageMap, ImageSource, ReferenceImageProvider};
///
/// let mut images = ImageMap::default();
/// images.insert(CharacterTag::new("Amy"), ImageSource::Base64("...".into()));
/// assert!(images.reference_image(&CharacterTag::new("Amy")).is_some());
/// assert!(images.reference_image(&CharacterTag::new("Bob")).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImageMap {
    images: HashMap<CharacterTag, ImageSource>,
}

impl ImageMap {
    /// Create an empty image map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image payload for a character.
    pub fn insert(&mut self, tag: CharacterTag, source: ImageSource) {
        self.images.insert(tag, source);
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether no images are registered.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ReferenceImageProvider for ImageMap {
    fn reference_image(&self, tag: &CharacterTag) -> Option<ReferenceImage> {
        self.images
            .get(tag)
            .map(|source| ReferenceImage::new(tag.clone(), source.clone()))
    }
}
