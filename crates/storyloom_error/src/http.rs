//! HTTP transport error types.

/// HTTP error with an optional response status and source location.
///
/// Raised by the transport layer for failures that are not specific to a
/// Gemini endpoint, such as asset downloads or client construction.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// Response status, when a response was received
    pub status: Option<u16>,
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert!(err.message.contains("Connection refused"));
    /// assert!(err.status.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::build(None, message.into())
    }

    /// Create an HttpError for a non-success response status.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_error::HttpError;
    ///
    /// let err = HttpError::with_status(404, "Not Found");
    /// assert_eq!(err.status, Some(404));
    /// assert!(err.message.starts_with("404"));
    /// ```
    #[track_caller]
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self::build(Some(status), format!("{} {}", status, message.into()))
    }

    #[track_caller]
    fn build(status: Option<u16>, message: String) -> Self {
        let location = std::panic::Location::caller();
        Self {
            status,
            message,
            line: location.line(),
            file: location.file(),
        }
    }
}
