//! Gemini-specific error types.

/// Generation features that require a billing-enabled API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PaidFeature {
    /// Pro-tier image generation
    #[display("Please use a paid API Key (Billing Enabled) for Gemini 3 Pro Images.")]
    ImageGeneration,
    /// Veo video generation
    #[display("Veo Video generation requires a paid Google Cloud Project with Billing Enabled.")]
    VideoGeneration,
}

/// Gemini-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GeminiErrorKind {
    /// Failed to create the HTTP transport
    #[display("Failed to create Gemini client: {}", _0)]
    ClientCreation(String),
    /// API request failed before a response was received
    #[display("Gemini API request failed: {}", _0)]
    ApiRequest(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// The endpoint answered but carried no usable payload
    #[display("Gemini returned no {}", _0)]
    EmptyResponse(String),
    /// The payload was present but does not match the expected schema
    #[display("Malformed Gemini response: {}", _0)]
    MalformedResponse(String),
    /// The story did not contain the number of scenes its mode requires
    #[display("Expected {} scenes, got {}", expected, actual)]
    SceneCountMismatch {
        /// Scene count required by the story mode
        expected: usize,
        /// Scene count found in the response
        actual: usize,
    },
    /// The key lacks billing for the requested feature (HTTP 403)
    #[display("Permission Denied: {}", _0)]
    PermissionDenied(PaidFeature),
    /// Base64 decoding failed
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
    /// A long-running operation finished with an error status
    #[display("Gemini operation failed: {}", _0)]
    OperationFailed(String),
    /// A finished video operation carried no download URI
    #[display("Failed to generate video URI")]
    VideoUriMissing,
    /// Downloading the generated video failed
    #[display("Failed to download video bytes: {}", _0)]
    VideoDownload(String),
    /// The video operation did not finish within the configured wait
    #[display("Video operation still running after {} seconds", waited_secs)]
    PollTimeout {
        /// Seconds spent polling before giving up
        waited_secs: u64,
    },
}

impl GeminiErrorKind {
    /// Whether this error carries an HTTP 403 signature.
    ///
    /// Matches a 403 status code directly, or a standalone `403` /
    /// `PERMISSION_DENIED` token inside the message text of errors that only
    /// carry a string. Digits embedded in operation names or URLs do not count.
    pub fn signals_forbidden(&self) -> bool {
        match self {
            GeminiErrorKind::PermissionDenied(_) => true,
            GeminiErrorKind::HttpError {
                status_code,
                message,
            } => *status_code == 403 || mentions_forbidden(message),
            GeminiErrorKind::ClientCreation(message)
            | GeminiErrorKind::ApiRequest(message)
            | GeminiErrorKind::OperationFailed(message)
            | GeminiErrorKind::VideoDownload(message) => mentions_forbidden(message),
            _ => false,
        }
    }
}

pub(crate) fn mentions_forbidden(message: &str) -> bool {
    message
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .any(|token| token == "403" || token == "PERMISSION_DENIED")
}

/// Gemini error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyloom_error::{GeminiError, GeminiErrorKind};
///
/// let err = GeminiError::new(GeminiErrorKind::EmptyResponse("story script".to_string()));
/// assert!(format!("{}", err).contains("no story script"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gemini Error: {} at line {} in {}", kind, line, file)]
pub struct GeminiError {
    /// The kind of error that occurred
    pub kind: GeminiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GeminiError {
    /// Create a new GeminiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeminiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
