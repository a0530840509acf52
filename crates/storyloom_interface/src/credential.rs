//! Persisted credential storage.

use storyloom_error::StoryloomResult;

/// A local key/value store for secrets such as the Gemini API key.
///
/// Implementations must be safe to share between tasks. Reads of a key
/// that was never set return `Ok(None)`.
pub trait CredentialStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> StoryloomResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoryloomResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoryloomResult<()>;
}
