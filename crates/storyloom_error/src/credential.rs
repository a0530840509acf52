//! Credential resolution and storage errors.

/// Credential error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CredentialErrorKind {
    /// No API key was found in any configured source
    #[display(
        "API Key is missing. Set {} or store a key with `storyloom key set`.",
        searched
    )]
    Missing {
        /// Human-readable list of the sources that were searched
        searched: String,
    },
    /// The credential store could not be read
    #[display("Failed to read credential store: {}", _0)]
    StoreRead(String),
    /// The credential store could not be written
    #[display("Failed to write credential store: {}", _0)]
    StoreWrite(String),
}

/// Credential error with location tracking.
///
/// # Examples
///
/// ```
/// use storyloom_error::{CredentialError, CredentialErrorKind};
///
/// let err = CredentialError::new(CredentialErrorKind::Missing {
///     searched: "API_KEY".to_string(),
/// });
/// assert!(format!("{}", err).contains("API Key is missing"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Credential Error: {} at line {} in {}", kind, line, file)]
pub struct CredentialError {
    /// The kind of error that occurred
    pub kind: CredentialErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CredentialError {
    /// Create a new credential error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CredentialErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
