//! Local key-value storage.
//!
//! The browser localStorage analog: a flat map of string keys to string
//! values, backed by a single JSON file on disk. Every write flushes the
//! whole file. A corrupt backing file is logged, discarded, and treated as
//! empty - losing a mock session is preferable to refusing to start.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Fixed storage keys.
pub mod keys {
    /// JSON-serialized current user.
    pub const USER: &str = "chap_user";

    /// Theme flag, "dark" or "light".
    pub const THEME: &str = "chap_theme";
}

/// File name of the backing store within the data directory.
const STORE_FILE: &str = "local_storage.json";

/// Errors that can occur while reading or writing local storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store could not be serialized.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Another holder of the shared store panicked mid-write.
    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// A handle to the store shared between the auth and theme stores.
pub type SharedStore = Arc<Mutex<LocalStore>>;

/// Lock a shared store, surfacing poisoning as a [`StorageError`].
///
/// # Errors
///
/// Returns [`StorageError::LockPoisoned`] if a previous holder panicked.
pub fn lock(store: &SharedStore) -> Result<MutexGuard<'_, LocalStore>, StorageError> {
    store.lock().map_err(|_| StorageError::LockPoisoned)
}

/// The on-disk key-value store.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Open (or create) the store under the given data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the backing
    /// file cannot be read. A present-but-corrupt file is NOT an error: the
    /// contents are discarded with a warning.
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(STORE_FILE);

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "discarding corrupt local storage file");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    /// Wrap a store for sharing between consumers.
    #[must_use]
    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// Read a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Write a value and flush to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.into());
        self.flush()
    }

    /// Remove a value and flush to disk. Removing an absent key is a no-op
    /// that still succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written.
    pub fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::open(dir.path()).unwrap();

        assert!(store.get(keys::THEME).is_none());
        store.set(keys::THEME, "dark").unwrap();
        assert_eq!(store.get(keys::THEME), Some("dark"));

        store.remove(keys::THEME).unwrap();
        assert!(store.get(keys::THEME).is_none());

        // Removing again is a no-op
        store.remove(keys::THEME).unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = LocalStore::open(dir.path()).unwrap();
            store.set(keys::USER, r#"{"name":"Thabo"}"#).unwrap();
        }
        let store = LocalStore::open(dir.path()).unwrap();
        assert_eq!(store.get(keys::USER), Some(r#"{"name":"Thabo"}"#));
    }

    #[test]
    fn test_corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STORE_FILE), "not json {{{").unwrap();

        let store = LocalStore::open(dir.path()).unwrap();
        assert!(store.get(keys::USER).is_none());
    }
}
