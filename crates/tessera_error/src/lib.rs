//! Error types for the Tessera prompt compiler.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use tessera_error::{TesseraResult, ConfigError};
//!
//! fn load_settings() -> TesseraResult<()> {
//!     Err(ConfigError::new("endpoint URL is empty"))?
//! }
//!
//! match load_settings() {
//!     Ok(_) => println!("loaded"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod compiler;
mod config;
mod error;

pub use backend::{BackendError, BackendErrorKind, RetryableError};
pub use compiler::{CompilerError, CompilerErrorKind};
pub use config::ConfigError;
pub use error::{TesseraError, TesseraErrorKind, TesseraResult};
