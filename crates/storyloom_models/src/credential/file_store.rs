//! JSON-file credential store.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use storyloom_error::{CredentialError, CredentialErrorKind, StoryloomResult};
use storyloom_interface::CredentialStore;

/// Credential store backed by a JSON object on disk.
///
/// # File Format
///
/// ```json
/// { "gemini_api_key": "AIza..." }
/// ```
///
/// A missing file reads as an empty store. Writes create the parent
/// directory and, on Unix, restrict the file to its owner (mode 0600).
/// Writes go to a sibling temp file first and are renamed into place.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Create a store at `path`. Nothing is touched until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StoryloomResult<BTreeMap<String, String>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(CredentialError::new(CredentialErrorKind::StoreRead(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
                .into());
            }
        };

        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&text).map_err(|e| {
            CredentialError::new(CredentialErrorKind::StoreRead(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
            .into()
        })
    }

    #[tracing::instrument(skip(self, values), fields(path = %self.path.display(), keys = values.len()))]
    fn write_all(&self, values: &BTreeMap<String, String>) -> StoryloomResult<()> {
        let write_error = |e: &dyn std::fmt::Display| {
            CredentialError::new(CredentialErrorKind::StoreWrite(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| write_error(&e))?;
            }
        }

        let json = serde_json::to_string_pretty(values).map_err(|e| write_error(&e))?;
        let temp_path = self.path.with_extension("json.tmp");
        // A leftover temp file would keep its old mode, so start from scratch.
        if let Err(e) = std::fs::remove_file(&temp_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                return Err(write_error(&e).into());
            }
        }
        let mut file = create_owner_only(&temp_path).map_err(|e| write_error(&e))?;
        file.write_all(json.as_bytes()).map_err(|e| write_error(&e))?;
        file.sync_all().map_err(|e| write_error(&e))?;
        drop(file);
        std::fs::rename(&temp_path, &self.path).map_err(|e| write_error(&e))?;

        tracing::debug!("Wrote credential store");
        Ok(())
    }

    fn update(&self, edit: impl FnOnce(&mut BTreeMap<String, String>)) -> StoryloomResult<()> {
        let _guard = self.write_lock.lock().map_err(|e| {
            CredentialError::new(CredentialErrorKind::StoreWrite(e.to_string()))
        })?;
        let mut values = self.read_all()?;
        edit(&mut values);
        self.write_all(&values)
    }
}

/// Create a new file readable and writable by its owner only (mode 0600).
#[cfg(unix)]
fn create_owner_only(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_owner_only(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> StoryloomResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StoryloomResult<()> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> StoryloomResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|values| {
            values.remove(key);
        })
    }
}
