//! Compiler error types.

/// Specific error conditions for script compilation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CompilerErrorKind {
    /// A character tag is defined more than once in the general prompt
    #[display("duplicate character description: {}", _0)]
    DuplicateCharacter(String),
    /// A story line references a tag with no definition in the registry
    #[display("{} has no prompt description (line {}), please remove it or define it", tag, line_index)]
    MissingDescription {
        /// The undefined tag as written in the story line
        tag: String,
        /// Zero-based index of the offending line
        line_index: usize,
    },
}

/// Error type for script compilation.
///
/// Compilation fails atomically: no partial output is produced when one of
/// these is raised.
///
/// # Examples
///
/// ```
/// use tessera_error::{CompilerError, CompilerErrorKind};
///
/// let err = CompilerError::new(CompilerErrorKind::DuplicateCharacter("[Amy]".to_string()));
/// assert!(format!("{}", err).contains("[Amy]"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Compiler Error: {} at line {} in {}", kind, line, file)]
pub struct CompilerError {
    /// The specific error condition
    pub kind: CompilerErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl CompilerError {
    /// Create a new CompilerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CompilerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
