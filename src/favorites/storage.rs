// ABOUTME: Key-value storage backends for the favorites slot
// ABOUTME: File storage with atomic replace, plus an in-memory backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Storage failure
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem access failed
    #[error("storage I/O error at {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
    /// The stored value could not be encoded or decoded
    #[error("favorites data is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The stored value decoded to something other than a list
    #[error("favorites data is corrupt: {0}")]
    Corrupt(String),
    /// Key contains characters that cannot be used as a file name
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    /// In-memory lock poisoned by a panicking writer
    #[error("storage lock poisoned")]
    Poisoned,
}

impl StorageError {
    fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A string-valued slot store, the local-storage analogue
pub trait KeyValueStorage: Send + Sync {
    /// Read a value; `None` when the key was never written
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value of `key`; readers see either the old or the new value
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be written. The previous
    /// value is then still in place.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; deleting a missing key succeeds
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`; the directory is created on first write
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` for keys that are not plain file names.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        // Write beside the target so the rename stays on one filesystem
        let mut temp =
            NamedTempFile::new_in(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        temp.write_all(value.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| StorageError::io(temp.path(), e))?;
        temp.persist(&path)
            .map_err(|e| StorageError::io(&path, e.error))?;

        debug!(path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }
}

/// Process-local storage for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage with one pre-filled slot
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::default();
        if let Ok(mut slots) = storage.slots.write() {
            slots.insert(key.into(), value.into());
        }
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.read().map_err(|_| StorageError::Poisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().map_err(|_| StorageError::Poisoned)?;
        slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().map_err(|_| StorageError::Poisoned)?;
        slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get("slot").unwrap(), None);
        storage.set("slot", "[1,2]").unwrap();
        assert_eq!(storage.get("slot").unwrap().as_deref(), Some("[1,2]"));

        storage.set("slot", "[]").unwrap();
        assert_eq!(storage.get("slot").unwrap().as_deref(), Some("[]"));

        storage.remove("slot").unwrap();
        storage.remove("slot").unwrap();
        assert_eq!(storage.get("slot").unwrap(), None);
    }

    #[test]
    fn test_file_storage_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set("spicesync_favorites_v1", "[]").unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["spicesync_favorites_v1.json"]);
    }

    #[test]
    fn test_invalid_keys_are_rejected() {
        let storage = FileStorage::new("/tmp");
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                storage.path_for(key),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::with_value("k", "v");
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }
}
