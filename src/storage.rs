//! Durable key-value storage that survives process restarts.
//!
//! DESIGN
//! ======
//! The browser build of this client kept its session in `localStorage`.
//! Here the same contract sits behind [`DurableStore`]: string keys,
//! string values, with JSON helpers on top. [`FileStore`] keeps one JSON
//! object per file and rewrites it on every mutation; [`MemoryStore`]
//! backs tests.
//!
//! TRADE-OFFS
//! ==========
//! Writes go through a temp file and a rename so a crash mid-write leaves
//! the previous state intact. There is no cross-process locking; two CLI
//! invocations racing on the same file resolve as last-writer-wins.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage file {path} is not a JSON object: {detail}")]
    CorruptFile { path: PathBuf, detail: String },
    #[error("stored value for '{key}' is malformed: {detail}")]
    CorruptValue { key: String, detail: String },
    #[error("value for '{key}' could not be encoded: {detail}")]
    Encode { key: String, detail: String },
}

/// String-keyed persistent store.
pub trait DurableStore: Send + Sync {
    /// Read the raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Load a JSON value stored under `key`.
///
/// # Errors
///
/// Returns [`StorageError::CorruptValue`] when the stored text is not valid
/// JSON for `T`, or any error from the store itself.
pub fn load_json<T: DeserializeOwned>(store: &dyn DurableStore, key: &str) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::CorruptValue { key: key.to_owned(), detail: e.to_string() })
}

/// Save `value` as JSON under `key`.
///
/// # Errors
///
/// Returns an error if encoding or the store write fails.
pub fn save_json<T: Serialize>(store: &dyn DurableStore, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| StorageError::Encode { key: key.to_owned(), detail: e.to_string() })?;
    store.set(key, &raw)
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Process-local store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Store persisted as a single JSON object on disk.
///
/// The in-memory map only changes once the new contents are on disk, so a
/// failed write leaves readers seeing what a restart would see.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| StorageError::CorruptFile { path: path.clone(), detail: e.to_string() })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        Ok(Self { path, entries: RwLock::new(entries) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Encode { key: "*".to_owned(), detail: e.to_string() })?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, raw).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut next = entries.clone();
        next.insert(key.to_owned(), value.to_owned());
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;
