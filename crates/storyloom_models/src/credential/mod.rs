//! API key resolution and persisted credential stores.
//!
//! The resolver checks environment variables first, then an optional
//! [`CredentialStore`](storyloom_interface::CredentialStore). It is consulted
//! on every generation call, so a key stored mid-session takes effect on the
//! next request.

mod file_store;
mod memory_store;
mod resolver;

pub use file_store::FileCredentialStore;
pub use memory_store::MemoryCredentialStore;
pub use resolver::{CredentialResolver, CredentialSource, EnvLookup};
