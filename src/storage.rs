//! Durable key-value storage
//!
//! This module provides:
//! - A `KeyValueStore` capability with a file-backed and an in-memory implementation
//! - `PersistedValue`, a typed JSON value living under one key

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to access storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value is not valid: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage is unavailable: {0}")]
    Unavailable(String),
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// ============================================
// File Backend (native platforms)
// ============================================

/// One file per key under a root directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `ATELIER_DATA_DIR` if set, else the platform's local data directory.
    pub fn default_location() -> PathBuf {
        if let Ok(dir) = std::env::var("ATELIER_DATA_DIR") {
            return PathBuf::from(dir);
        }

        if let Some(data_dir) = dirs::data_local_dir() {
            return data_dir.join("atelier").join("storage");
        }

        PathBuf::from("cache").join("storage")
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ============================================
// Memory Backend (WASM, tests)
// ============================================

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// The store the app uses on this platform.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Arc<dyn KeyValueStore> {
    Arc::new(FileStore::new(FileStore::default_location()))
}

#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}

/// A JSON-serialized value stored under a fixed key.
pub struct PersistedValue<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> PersistedValue<T> {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    /// `Ok(None)` when nothing has been stored yet.
    pub fn load(&self) -> Result<Option<T>, StorageError> {
        match self.store.get(self.key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn save(&self, value: &T) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(value)?;
        self.store.set(self.key, &serialized)
    }
}

/// Sanitize storage key for filesystem use
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("moodBoard"), "moodBoard");
        assert_eq!(sanitize_key("user:preferences"), "user_preferences");
        assert_eq!(sanitize_key("../escape"), "___escape");
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_persisted_value_reports_corrupt_json() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set("numbers", "[1, 2,").unwrap();
        let value = PersistedValue::<Vec<u32>>::new(store, "numbers");
        assert!(matches!(value.load(), Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_persisted_value_round_trip() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let value = PersistedValue::<Vec<u32>>::new(store, "numbers");
        assert_eq!(value.load().unwrap(), None);
        value.save(&vec![3, 1, 2]).unwrap();
        assert_eq!(value.load().unwrap(), Some(vec![3, 1, 2]));
    }
}
