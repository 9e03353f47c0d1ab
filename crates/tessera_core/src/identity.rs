//! Identity cap configuration for the prompt compiler.

use serde::{Deserialize, Serialize};
use tessera_error::ConfigError;

/// Compiler policy knobs for identity-anchored backends.
///
/// The backend served by the reference deployment renders at most two
/// character identities per image; `max_simultaneous_identities` elevates
/// that cap from a magic number to configuration so the compiler can target
/// backends with different limits.
///
/// # Examples
///
/// ```
/// use tessera_core::IdentityConfig;
///
/// let config = IdentityConfig::default();
/// assert_eq!(*config.max_simultaneous_identities(), 2);
/// assert_eq!(config.no_character_marker(), "[NC]");
///
/// let wide = IdentityConfig::builder()
///     .max_simultaneous_identities(3)
///     .build();
/// assert_eq!(*wide.max_simultaneous_identities(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    /// Maximum character identities the backend can anchor in one image.
    #[serde(default = "default_identity_cap")]
    max_simultaneous_identities: usize,

    /// Marker prepended to lines with no character identity.
    #[serde(default = "default_marker")]
    no_character_marker: String,

    /// Delimiter joining a rewritten prompt to its display caption.
    #[serde(default = "default_delimiter")]
    caption_delimiter: char,
}

fn default_identity_cap() -> usize {
    2
}

fn default_marker() -> String {
    "[NC]".to_string()
}

fn default_delimiter() -> char {
    '#'
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            max_simultaneous_identities: default_identity_cap(),
            no_character_marker: default_marker(),
            caption_delimiter: default_delimiter(),
        }
    }
}

impl IdentityConfig {
    /// Creates a new identity config builder.
    pub fn builder() -> IdentityConfigBuilder {
        IdentityConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity cap is zero or the no-character
    /// marker is not a bracketed token.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_simultaneous_identities == 0 {
            return Err(ConfigError::new(
                "max_simultaneous_identities must be at least 1",
            ));
        }
        if !self.no_character_marker.starts_with('[') || !self.no_character_marker.ends_with(']') {
            return Err(ConfigError::new(format!(
                "no_character_marker must be a bracketed token, got {}",
                self.no_character_marker
            )));
        }
        Ok(())
    }
}

/// Builder for `IdentityConfig`.
#[derive(Debug, Default)]
pub struct IdentityConfigBuilder {
    max_simultaneous_identities: Option<usize>,
    no_character_marker: Option<String>,
    caption_delimiter: Option<char>,
}

impl IdentityConfigBuilder {
    /// Sets the identity cap.
    pub fn max_simultaneous_identities(mut self, value: usize) -> Self {
        self.max_simultaneous_identities = Some(value);
        self
    }

    /// Sets the no-character marker.
    pub fn no_character_marker(mut self, value: impl Into<String>) -> Self {
        self.no_character_marker = Some(value.into());
        self
    }

    /// Sets the caption delimiter.
    pub fn caption_delimiter(mut self, value: char) -> Self {
        self.caption_delimiter = Some(value);
        self
    }

    /// Builds the `IdentityConfig`.
    pub fn build(self) -> IdentityConfig {
        IdentityConfig {
            max_simultaneous_identities: self
                .max_simultaneous_identities
                .unwrap_or_else(default_identity_cap),
            no_character_marker: self.no_character_marker.unwrap_or_else(default_marker),
            caption_delimiter: self.caption_delimiter.unwrap_or_else(default_delimiter),
        }
    }
}
