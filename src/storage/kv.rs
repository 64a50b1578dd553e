//! Durable key-value storage backends

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Durable string-keyed storage.
///
/// Values are opaque strings; callers own serialization and key naming.
/// Implementations must be safe to share across threads.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: one `<key>.json` file per key under a base directory.
pub struct FileKvStore {
    base_path: PathBuf,
}

impl FileKvStore {
    /// Create a store rooted at `base_path`, creating the directory if needed
    pub fn new(base_path: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("melete"))
            .ok_or(StorageError::DataDirNotFound)
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.key_path(key), value)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral embedding.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileKvStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKvStore::new(temp_dir.path().to_path_buf()).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_get_missing_key_returns_none() {
        let (store, _temp) = create_test_store();
        assert!(store.get("studyPlan_nobody").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let (store, _temp) = create_test_store();
        store.set("studyPlan_localUser123", "{\"x\":1}").unwrap();
        let value = store.get("studyPlan_localUser123").unwrap();
        assert_eq!(value.as_deref(), Some("{\"x\":1}"));
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let (store, _temp) = create_test_store();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_value_lands_in_key_named_file() {
        let (store, temp) = create_test_store();
        store.set("studyPlan_localUser123", "{}").unwrap();
        assert!(temp.path().join("studyPlan_localUser123.json").exists());
    }

    #[test]
    fn test_new_creates_base_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("data").join("melete");
        let store = FileKvStore::new(nested.clone()).unwrap();
        assert!(nested.exists());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryKvStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
