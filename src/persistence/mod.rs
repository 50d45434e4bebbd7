//! Key-value persistence for integer records
//!
//! Backends:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `JsonFileStore`: one JSON object of key → integer on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure reading or writing a store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed store data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Integer key-value store
pub trait ScoreStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError>;
    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// JSON file store. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, u64>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);
        let json = serde_json::to_string_pretty(&values)?;

        // Write beside the target then rename, so a crash never leaves half a file
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Browser LocalStorage store (values kept as decimal strings)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not accessible".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let item = Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        // Unparseable values read as absent
        Ok(item.and_then(|s| s.trim().parse().ok()))
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, &value.to_string())
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("snake_core_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", 7).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(7));
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert_eq!(store.get("snake.highScore").unwrap(), None);
    }

    #[test]
    fn test_json_store_persists() {
        let path = temp_path("persist");
        let mut store = JsonFileStore::new(&path);
        store.set("snake.highScore", 12).unwrap();
        store.set("other", 3).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("snake.highScore").unwrap(), Some(12));
        assert_eq!(reopened.get("other").unwrap(), Some(3));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_json_store_corrupt_file() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get("snake.highScore"), Err(StoreError::Json(_))));

        let _ = std::fs::remove_file(&path);
    }
}
