//! Top-level error wrapper types.

use crate::{
    ConfigError, CredentialError, CredentialErrorKind, GeminiError,
    GeminiErrorKind, HttpError, JsonError, StorageError, gemini::mentions_forbidden,
};

/// Every error condition a Storyloom operation can surface.
///
/// # Examples
///
/// ```
/// use storyloom_error::{StoryloomError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: StoryloomError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryloomErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Credential resolution or storage error
    #[from(CredentialError)]
    Credential(CredentialError),
    /// Gemini API error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Asset storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Storyloom error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyloom_error::{StoryloomError, StoryloomResult, ConfigError};
///
/// fn might_fail() -> StoryloomResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyloom Error: {}", _0)]
pub struct StoryloomError(Box<StoryloomErrorKind>);

impl StoryloomError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryloomErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryloomErrorKind {
        &self.0
    }

    /// The Gemini error kind, if this is a Gemini error.
    pub fn gemini_kind(&self) -> Option<&GeminiErrorKind> {
        match self.kind() {
            StoryloomErrorKind::Gemini(err) => Some(&err.kind),
            _ => None,
        }
    }

    /// Whether no credential could be resolved.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_error::{CredentialError, CredentialErrorKind, StoryloomError};
    ///
    /// let err: StoryloomError = CredentialError::new(CredentialErrorKind::Missing {
    ///     searched: "API_KEY".to_string(),
    /// })
    /// .into();
    /// assert!(err.is_missing_credential());
    /// ```
    pub fn is_missing_credential(&self) -> bool {
        matches!(
            self.kind(),
            StoryloomErrorKind::Credential(CredentialError {
                kind: CredentialErrorKind::Missing { .. },
                ..
            })
        )
    }

    /// Whether the underlying failure carries an HTTP 403 signature.
    ///
    /// Only the message payloads are inspected, never the location suffix of
    /// the display string.
    pub fn signals_forbidden(&self) -> bool {
        match self.kind() {
            StoryloomErrorKind::Gemini(err) => err.kind.signals_forbidden(),
            StoryloomErrorKind::Http(err) => {
                err.status == Some(403) || mentions_forbidden(&err.message)
            }
            _ => false,
        }
    }
}

// Generic From implementation for any type that converts to StoryloomErrorKind
impl<T> From<T> for StoryloomError
where
    T: Into<StoryloomErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyloom operations.
///
/// # Examples
///
/// ```
/// use storyloom_error::{StoryloomResult, HttpError};
///
/// fn fetch_data() -> StoryloomResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type StoryloomResult<T> = std::result::Result<T, StoryloomError>;
