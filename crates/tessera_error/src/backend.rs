//! Image backend error types and retry classification.

/// Specific error conditions at the image backend boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum BackendErrorKind {
    /// Response payload could not be decoded
    #[display("failed to decode backend response: {}", _0)]
    Decode(String),
    /// Response decoded but failed schema validation
    #[display("backend response failed validation: {}", _0)]
    Validation(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Endpoint could not be reached
    #[display("endpoint unreachable: {}", _0)]
    Endpoint(String),
    /// Base64 image payload decoding failed
    #[display("base64 decode error: {}", _0)]
    Base64Decode(String),
    /// Backend reported a generation failure
    #[display("image generation error: {}", _0)]
    Generation(String),
    /// Backend returned an empty image list
    #[display("backend returned no images")]
    NoImages,
}

impl BackendErrorKind {
    /// Check if this error type should be retried.
    ///
    /// Only decode and validation failures are retried; everything else
    /// propagates to the caller immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BackendErrorKind::Decode(_) | BackendErrorKind::Validation(_)
        )
    }
}

/// Backend error with source location tracking.
///
/// # Examples
///
/// ```
/// use tessera_error::{BackendError, BackendErrorKind};
///
/// let err = BackendError::new(BackendErrorKind::NoImages);
/// assert!(format!("{}", err).contains("no images"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Backend Error: {} at line {} in {}", kind, line, file)]
pub struct BackendError {
    /// The kind of error that occurred
    pub kind: BackendErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BackendError {
    /// Create a new BackendError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BackendErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use tessera_error::{BackendError, BackendErrorKind, RetryableError};
///
/// let err = BackendError::new(BackendErrorKind::Validation(
///     "missing images_base64 field".to_string(),
/// ));
/// assert!(err.is_retryable());
///
/// let err = BackendError::new(BackendErrorKind::Http {
///     status_code: 401,
///     message: "unauthorized".to_string(),
/// });
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient parse failures (decode, validation) should return true.
    /// Permanent errors like authorization failures should return false.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for BackendError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
