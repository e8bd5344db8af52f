//! Workspace persistence configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Override for the key-value storage file. Defaults to
    /// `<data_dir>/oneai/storage.json`.
    pub storage_path: Option<String>,
    /// Autosave interval in seconds while the workspace has unsaved
    /// changes; `0` disables autosave (valid range: 0-3600).
    pub autosave_secs: u32,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            autosave_secs: 30,
        }
    }
}
