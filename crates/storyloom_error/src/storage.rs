//! Asset storage error types.

/// Kinds of asset storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create an output directory
    #[display("Failed to create directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read a file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// A `data:` URI could not be decoded
    #[display("Invalid data URI: {}", _0)]
    InvalidDataUri(String),
    /// Audio could not be packaged for playback
    #[display("Audio encoding failed: {}", _0)]
    AudioEncoding(String),
}

/// Asset storage error with location tracking.
///
/// # Examples
///
/// ```
/// use storyloom_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::FileWrite("out/cover.png".to_string()));
/// assert!(format!("{}", err).contains("Failed to write file"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
