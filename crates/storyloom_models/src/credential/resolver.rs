use std::fmt;
use std::sync::Arc;
use storyloom_config::{CredentialSettings, StoryloomConfig};
use storyloom_error::{CredentialError, CredentialErrorKind, StoryloomResult};
use storyloom_interface::CredentialStore;
use tracing::{debug, instrument};

use super::FileCredentialStore;

/// Where a resolved API key came from.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CredentialSource {
    /// The named environment variable
    #[display("environment variable {}", _0)]
    Environment(String),
    /// The credential store, under the given key
    #[display("credential store entry `{}`", _0)]
    Store(String),
}

/// Environment lookup used by the resolver.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Resolves the Gemini API key from the environment or a credential store.
///
/// Empty values and the literal `"undefined"` are treated as absent in every
/// source.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use storyloom_config::CredentialSettings;
/// use storyloom_interface::CredentialStore;
/// use storyloom_models::{CredentialResolver, MemoryCredentialStore};
///
/// let store = Arc::new(MemoryCredentialStore::new());
/// store.set("gemini_api_key", "stored-key").unwrap();
///
/// let resolver = CredentialResolver::new(&CredentialSettings::default())
///     .with_env_lookup(|_| None)
///     .with_store(store);
/// assert_eq!(resolver.resolve().unwrap(), "stored-key");
///
/// let resolver = resolver.with_env_lookup(|name| {
///     (name == "GEMINI_API_KEY").then(|| "env-key".to_string())
/// });
/// assert_eq!(resolver.resolve().unwrap(), "env-key");
/// ```
#[derive(Clone)]
pub struct CredentialResolver {
    env_vars: Vec<String>,
    store_key: String,
    env: EnvLookup,
    store: Option<Arc<dyn CredentialStore>>,
}

impl fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("env_vars", &self.env_vars)
            .field("store_key", &self.store_key)
            .field("has_store", &self.store.is_some())
            .finish()
    }
}

impl CredentialResolver {
    /// Resolver over the process environment with no store.
    pub fn new(settings: &CredentialSettings) -> Self {
        Self {
            env_vars: settings.env_vars.clone(),
            store_key: settings.store_key.clone(),
            env: Arc::new(|name| std::env::var(name).ok()),
            store: None,
        }
    }

    /// Resolver over the process environment and the configured credential file.
    #[instrument(skip(config))]
    pub fn from_config(config: &StoryloomConfig) -> Self {
        let resolver = Self::new(&config.credentials);
        match config.credential_store_path() {
            Some(path) => {
                debug!(path = %path.display(), "Using file credential store");
                resolver.with_store(Arc::new(FileCredentialStore::new(path)))
            }
            None => resolver,
        }
    }

    /// Replace the environment lookup.
    pub fn with_env_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.env = Arc::new(lookup);
        self
    }

    /// Attach a credential store consulted after the environment.
    pub fn with_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// The attached credential store, if any.
    pub fn store(&self) -> Option<&Arc<dyn CredentialStore>> {
        self.store.as_ref()
    }

    /// Key under which the store holds the API key.
    pub fn store_key(&self) -> &str {
        &self.store_key
    }

    /// Return the first usable API key.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialErrorKind::Missing`] when no source holds a key,
    /// or a store read error when the store cannot be read.
    pub fn resolve(&self) -> StoryloomResult<String> {
        self.resolve_with_source().map(|(key, _)| key)
    }

    /// Return the first usable API key and where it was found.
    #[instrument(skip(self))]
    pub fn resolve_with_source(&self) -> StoryloomResult<(String, CredentialSource)> {
        for name in &self.env_vars {
            if let Some(value) = (self.env)(name).and_then(usable) {
                debug!(source = %name, "Resolved API key from environment");
                return Ok((value, CredentialSource::Environment(name.clone())));
            }
        }

        if let Some(store) = &self.store {
            if let Some(value) = store.get(&self.store_key)?.and_then(usable) {
                debug!(key = %self.store_key, "Resolved API key from credential store");
                return Ok((value, CredentialSource::Store(self.store_key.clone())));
            }
        }

        Err(CredentialError::new(CredentialErrorKind::Missing {
            searched: self.describe_sources(),
        })
        .into())
    }

    /// Human-readable list of the sources consulted, in order.
    pub fn describe_sources(&self) -> String {
        let mut sources = self.env_vars.clone();
        if self.store.is_some() {
            sources.push(format!("the stored `{}`", self.store_key));
        }
        if sources.is_empty() {
            "a credential source".to_string()
        } else {
            sources.join(", ")
        }
    }
}

fn usable(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "undefined" {
        None
    } else {
        Some(trimmed.to_string())
    }
}
