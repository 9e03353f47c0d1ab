//! Trait definitions for image-generation backends.

use async_trait::async_trait;
use tessera_core::PromptRequest;
use tessera_error::TesseraResult;

/// A decoded image returned by a backend.
///
/// The compiler never interprets image content; payloads pass through as
/// opaque decoded bytes.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct GeneratedImage {
    /// Decoded image bytes (typically PNG)
    bytes: Vec<u8>,
}

impl GeneratedImage {
    /// Wrap decoded image bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Consume the image, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Core trait all image backends implement.
///
/// Given a compiled [`PromptRequest`], a backend returns zero or more
/// decoded images. Callers wanting resilience against transient decode or
/// validation failures wrap invocations with
/// [`invoke_with_retry`](crate::invoke_with_retry).
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Render one compiled request into images.
    async fn generate_images(&self, request: &PromptRequest) -> TesseraResult<Vec<GeneratedImage>>;

    /// Backend name (e.g. "story-diffusion").
    fn backend_name(&self) -> &'static str;
}
