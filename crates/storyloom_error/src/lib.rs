//! Error types for the Storyloom library.
//!
//! This crate provides the foundation error types used throughout the Storyloom workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! The taxonomy callers care about most:
//!
//! | Condition | Type |
//! |-----------|------|
//! | No API key in any source | [`CredentialErrorKind::Missing`] |
//! | Endpoint returned no usable payload | [`GeminiErrorKind::EmptyResponse`] |
//! | Payload does not match the story schema | [`GeminiErrorKind::MalformedResponse`], [`GeminiErrorKind::SceneCountMismatch`] |
//! | Paid tier / billing required (HTTP 403) | [`GeminiErrorKind::PermissionDenied`] |
//!
//! # Examples
//!
//! ```
//! use storyloom_error::{StoryloomResult, HttpError};
//!
//! fn fetch_data() -> StoryloomResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod credential;
mod error;
mod gemini;
mod http;
mod json;
mod storage;

pub use config::ConfigError;
pub use credential::{CredentialError, CredentialErrorKind};
pub use error::{StoryloomError, StoryloomErrorKind, StoryloomResult};
pub use gemini::{GeminiError, GeminiErrorKind, PaidFeature};
pub use http::HttpError;
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
