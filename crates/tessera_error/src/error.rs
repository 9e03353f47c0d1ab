//! Top-level error wrapper types.

use crate::{BackendError, CompilerError, ConfigError, RetryableError};

/// The foundation error enum for the Tessera workspace.
///
/// # Examples
///
/// ```
/// use tessera_error::{TesseraError, ConfigError};
///
/// let cfg_err = ConfigError::new("style preset unknown");
/// let err: TesseraError = cfg_err.into();
/// assert!(format!("{}", err).contains("Config Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TesseraErrorKind {
    /// Script compilation error
    #[from(CompilerError)]
    Compiler(CompilerError),
    /// Image backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Tessera error with kind discrimination.
///
/// # Examples
///
/// ```
/// use tessera_error::{TesseraResult, CompilerError, CompilerErrorKind};
///
/// fn might_fail() -> TesseraResult<()> {
///     Err(CompilerError::new(CompilerErrorKind::DuplicateCharacter(
///         "[Amy]".to_string(),
///     )))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("compiled"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Tessera Error: {}", _0)]
pub struct TesseraError(Box<TesseraErrorKind>);

impl TesseraError {
    /// Create a new error from a kind.
    pub fn new(kind: TesseraErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TesseraErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to TesseraErrorKind
impl<T> From<T> for TesseraError
where
    T: Into<TesseraErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for TesseraError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            TesseraErrorKind::Backend(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Result type for Tessera operations.
///
/// # Examples
///
/// ```
/// use tessera_error::{TesseraResult, BackendError, BackendErrorKind};
///
/// fn fetch_images() -> TesseraResult<Vec<u8>> {
///     Err(BackendError::new(BackendErrorKind::NoImages))?
/// }
/// ```
pub type TesseraResult<T> = std::result::Result<T, TesseraError>;
