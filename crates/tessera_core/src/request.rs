//! The compiled request record sent to an image backend.

use crate::ReferenceImage;
use serde::{Deserialize, Serialize};

/// One image-generation request, compiled from one story line.
///
/// Each entry of `prompt_array` pairs a rewritten model-facing prompt with
/// its original caption, joined by the caption delimiter. `id_length` is the
/// number of leading entries that serve as identity-anchoring reference
/// prompts; it never exceeds the backend's identity cap.
///
/// # Examples
///
/// ```
/// use tessera_core::PromptRequest;
///
/// let request = PromptRequest::new(
///     vec!["[Amy] walks home#[Amy] walks home".to_string()],
///     0,
///     vec![],
///     "[Amy] a young woman img".to_string(),
/// );
/// assert_eq!(*request.id_length(), 0);
/// assert!(request.ref_images().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PromptRequest {
    /// Ordered rewritten prompt strings, anchors first
    prompt_array: Vec<String>,
    /// Count of identity-anchoring leading prompts (0, 1, or 2)
    id_length: usize,
    /// Reference images in priority order, at most the identity cap
    ref_images: Vec<ReferenceImage>,
    /// Shared visual context: at most the first two character figure lines
    general_prompt: String,
}

impl PromptRequest {
    /// Assemble a request record. No further mutation after assembly.
    pub fn new(
        prompt_array: Vec<String>,
        id_length: usize,
        ref_images: Vec<ReferenceImage>,
        general_prompt: String,
    ) -> Self {
        Self {
            prompt_array,
            id_length,
            ref_images,
            general_prompt,
        }
    }
}
