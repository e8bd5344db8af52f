//! Key-value backends for persisted state.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::PersistenceError;

/// Opaque string store keyed by string.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// In-memory store, mostly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_map<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> T,
    ) -> Result<T, PersistenceError> {
        let mut map = self
            .inner
            .lock()
            .map_err(|_| PersistenceError::Store("memory store lock poisoned".into()))?;
        Ok(f(&mut map))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.with_map(|map| map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.with_map(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.with_map(|map| {
            map.remove(key);
        })
    }
}

type StoreMap = BTreeMap<String, String>;

/// Store backed by a single JSON object file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/oneai/storage.json`, if the platform has a data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("oneai").join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<StoreMap, PersistenceError> {
        if !self.path.exists() {
            return Ok(StoreMap::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            PersistenceError::Store(format!("failed to read {}: {e}", self.path.display()))
        })?;
        if raw.trim().is_empty() {
            return Ok(StoreMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            PersistenceError::Corrupt(format!("failed to parse {}: {e}", self.path.display()))
        })
    }

    fn write_map(&self, map: &StoreMap) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PersistenceError::Store(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let serialized = serde_json::to_string_pretty(map)
            .map_err(|e| PersistenceError::Store(format!("failed to serialize store: {e}")))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serialized).map_err(|e| {
            PersistenceError::Store(format!("failed to write {}: {e}", tmp.display()))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            PersistenceError::Store(format!("failed to replace {}: {e}", self.path.display()))
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        // Overwrite a corrupt file.
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(PersistenceError::Corrupt(_)) => StoreMap::new(),
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}
