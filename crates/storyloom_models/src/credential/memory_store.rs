use std::collections::HashMap;
use std::sync::RwLock;
use storyloom_error::{CredentialError, CredentialErrorKind, StoryloomResult};
use storyloom_interface::CredentialStore;

/// In-process credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> StoryloomResult<Option<String>> {
        let values = self.values.read().map_err(|e| {
            CredentialError::new(CredentialErrorKind::StoreRead(e.to_string()))
        })?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoryloomResult<()> {
        let mut values = self.values.write().map_err(|e| {
            CredentialError::new(CredentialErrorKind::StoreWrite(e.to_string()))
        })?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoryloomResult<()> {
        let mut values = self.values.write().map_err(|e| {
            CredentialError::new(CredentialErrorKind::StoreWrite(e.to_string()))
        })?;
        values.remove(key);
        Ok(())
    }
}
