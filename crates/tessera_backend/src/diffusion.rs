//! HTTP client for a hosted StoryDiffusion endpoint.

use crate::{GeneratedImage, ImageBackend};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use tessera_core::{ImageSource, PromptRequest};
use tessera_error::{BackendError, BackendErrorKind, ConfigError, TesseraResult};
use tracing::{debug, instrument};

/// Environment variable overriding the endpoint URL.
const ENDPOINT_ENV: &str = "TESSERA_ENDPOINT_URL";

/// Visual style preset understood by the StoryDiffusion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString)]
pub enum StylePreset {
    /// Japanese anime rendering (endpoint default)
    #[default]
    #[strum(serialize = "Japanese Anime")]
    JapaneseAnime,
    /// Photorealistic rendering
    #[strum(serialize = "Photographic")]
    Photographic,
    /// Film-like rendering
    #[strum(serialize = "Cinematic")]
    Cinematic,
    /// Western comic book rendering
    #[strum(serialize = "Comic book")]
    ComicBook,
    /// Line art rendering
    #[strum(serialize = "Line art")]
    LineArt,
    /// No style conditioning
    #[strum(serialize = "(No style)")]
    NoStyle,
}

/// Connection and rendering settings for [`StoryDiffusionClient`].
///
/// # Examples
///
/// ```
/// use tessera_backend::{DiffusionConfig, StylePreset};
///
/// let config = DiffusionConfig::builder()
///     .endpoint_url("http://localhost:8080/invocations")
///     .style(StylePreset::Photographic)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct DiffusionConfig {
    /// Full URL of the inference endpoint
    endpoint_url: String,
    /// Visual style preset
    style: StylePreset,
    /// Comic panel layout identifier
    comic_type: String,
    /// Base model identifier on the endpoint
    sd_type: String,
    /// Output image height in pixels
    height: u32,
    /// Output image width in pixels
    width: u32,
}

impl DiffusionConfig {
    /// Creates a new config builder.
    pub fn builder() -> DiffusionConfigBuilder {
        DiffusionConfigBuilder::default()
    }

    /// Build a config from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `TESSERA_ENDPOINT_URL` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint_url = std::env::var(ENDPOINT_ENV)
            .map_err(|e| ConfigError::new(format!("{ENDPOINT_ENV} not set: {e}")))?;
        Ok(Self::builder().endpoint_url(endpoint_url).build())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is empty or a dimension is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint_url.is_empty() {
            return Err(ConfigError::new("endpoint URL is empty"));
        }
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::new(format!(
                "image dimensions must be nonzero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Builder for `DiffusionConfig`.
#[derive(Debug, Default)]
pub struct DiffusionConfigBuilder {
    endpoint_url: Option<String>,
    style: Option<StylePreset>,
    comic_type: Option<String>,
    sd_type: Option<String>,
    height: Option<u32>,
    width: Option<u32>,
}

impl DiffusionConfigBuilder {
    /// Sets the endpoint URL.
    pub fn endpoint_url(mut self, value: impl Into<String>) -> Self {
        self.endpoint_url = Some(value.into());
        self
    }

    /// Sets the style preset.
    pub fn style(mut self, value: StylePreset) -> Self {
        self.style = Some(value);
        self
    }

    /// Sets the comic panel layout.
    pub fn comic_type(mut self, value: impl Into<String>) -> Self {
        self.comic_type = Some(value.into());
        self
    }

    /// Sets the base model identifier.
    pub fn sd_type(mut self, value: impl Into<String>) -> Self {
        self.sd_type = Some(value.into());
        self
    }

    /// Sets the output height.
    pub fn height(mut self, value: u32) -> Self {
        self.height = Some(value);
        self
    }

    /// Sets the output width.
    pub fn width(mut self, value: u32) -> Self {
        self.width = Some(value);
        self
    }

    /// Builds the `DiffusionConfig`.
    pub fn build(self) -> DiffusionConfig {
        DiffusionConfig {
            endpoint_url: self.endpoint_url.unwrap_or_default(),
            style: self.style.unwrap_or_default(),
            comic_type: self
                .comic_type
                .unwrap_or_else(|| "Classic Comic Style".to_string()),
            sd_type: self.sd_type.unwrap_or_else(|| "Unstable".to_string()),
            height: self.height.unwrap_or(768),
            width: self.width.unwrap_or(768),
        }
    }
}

/// Wire payload for the StoryDiffusion endpoint.
///
/// Field names follow the endpoint's JSON schema; `files` is omitted
/// entirely when no reference images are attached.
#[derive(Debug, Clone, Serialize)]
pub struct DiffusionRequest {
    /// Shared visual context, identity-suffixed figure lines
    pub general_prompt: String,
    /// Anchors-first prompt entries
    pub prompt_array: Vec<String>,
    /// Style preset wire name
    pub style: String,
    /// Output height
    #[serde(rename = "G_height")]
    pub height: u32,
    /// Output width
    #[serde(rename = "G_width")]
    pub width: u32,
    /// Panel layout identifier
    pub comic_type: String,
    /// Base64 reference images, omitted when empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    /// Identity anchor count
    #[serde(rename = "id_length_")]
    pub id_length: usize,
    /// Base model identifier
    pub sd_type: String,
}

impl DiffusionRequest {
    /// Build the wire payload from a compiled request and client settings.
    pub fn from_parts(request: &PromptRequest, config: &DiffusionConfig) -> Self {
        let files = request
            .ref_images()
            .iter()
            .map(|image| match image.source() {
                ImageSource::Base64(data) => data.clone(),
                ImageSource::Binary(bytes) => BASE64.encode(bytes),
            })
            .collect();

        Self {
            general_prompt: request.general_prompt().clone(),
            prompt_array: request.prompt_array().clone(),
            style: config.style().to_string(),
            height: *config.height(),
            width: *config.width(),
            comic_type: config.comic_type().clone(),
            files,
            id_length: *request.id_length(),
            sd_type: config.sd_type().clone(),
        }
    }
}

/// Client for a hosted StoryDiffusion inference endpoint.
///
/// One synchronous HTTP round trip per request: POST the JSON payload,
/// receive `{ "images_base64": [...] }`, decode. Job queueing and async
/// polling are the deployment's concern, not this client's.
#[derive(Debug, Clone)]
pub struct StoryDiffusionClient {
    client: reqwest::Client,
    config: DiffusionConfig,
}

impl StoryDiffusionClient {
    /// Create a client over a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: DiffusionConfig) -> TesseraResult<Self> {
        config.validate()?;
        Ok(Self {
            client: reqwest::Client::new(),
            config,
        })
    }

    /// Create a client configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `TESSERA_ENDPOINT_URL` is not set.
    pub fn from_env() -> TesseraResult<Self> {
        Self::new(DiffusionConfig::from_env()?)
    }

    /// The active configuration.
    pub fn config(&self) -> &DiffusionConfig {
        &self.config
    }

    /// Render a single-character identity portrait.
    ///
    /// Anchors nothing (`id_length = 0`, no reference images); used to
    /// bootstrap the reference image set before compiling a script.
    ///
    /// # Errors
    ///
    /// Returns an error on any backend failure, or
    /// [`BackendErrorKind::NoImages`] if the endpoint returned none.
    #[instrument(skip_all)]
    pub async fn generate_identity_portrait(
        &self,
        prompt: &str,
        general_prompt: &str,
    ) -> TesseraResult<GeneratedImage> {
        let request = PromptRequest::new(
            vec![prompt.to_string()],
            0,
            vec![],
            general_prompt.to_string(),
        );
        let mut images = self.generate_images(&request).await?;
        if images.is_empty() {
            return Err(BackendError::new(BackendErrorKind::NoImages))?;
        }
        Ok(images.remove(0))
    }

    /// Extract and decode the image list from an endpoint response body.
    fn decode_response(body: &str) -> TesseraResult<Vec<GeneratedImage>> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| BackendError::new(BackendErrorKind::Decode(e.to_string())))?;

        let Some(encoded) = value.get("images_base64").and_then(|v| v.as_array()) else {
            return Err(BackendError::new(BackendErrorKind::Validation(
                "response missing images_base64 array".to_string(),
            )))?;
        };

        encoded
            .iter()
            .map(|entry| {
                let data = entry.as_str().ok_or_else(|| {
                    BackendError::new(BackendErrorKind::Validation(
                        "images_base64 entry is not a string".to_string(),
                    ))
                })?;
                let bytes = BASE64
                    .decode(data)
                    .map_err(|e| BackendError::new(BackendErrorKind::Base64Decode(e.to_string())))?;
                Ok(GeneratedImage::new(bytes))
            })
            .collect()
    }
}

#[async_trait]
impl ImageBackend for StoryDiffusionClient {
    #[instrument(skip_all, fields(prompts = request.prompt_array().len(), id_length = request.id_length()))]
    async fn generate_images(&self, request: &PromptRequest) -> TesseraResult<Vec<GeneratedImage>> {
        let payload = DiffusionRequest::from_parts(request, &self.config);
        debug!(url = %self.config.endpoint_url(), "sending StoryDiffusion request");

        let response = self
            .client
            .post(self.config.endpoint_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| BackendError::new(BackendErrorKind::Endpoint(e.to_string())))?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::new(BackendErrorKind::Http {
                status_code,
                message,
            }))?;
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::new(BackendErrorKind::Endpoint(e.to_string())))?;

        let images = Self::decode_response(&body)?;
        debug!(images = images.len(), "StoryDiffusion response decoded");
        Ok(images)
    }

    fn backend_name(&self) -> &'static str {
        "story-diffusion"
    }
}
