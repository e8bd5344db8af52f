//! Workspace persistence over a key-value store.
//!
//! `save` never fails from the caller's point of view and `load` always
//! returns a usable workspace, falling back to the built-in default.

mod store;
mod wire;

#[cfg(test)]
mod tests;

pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use wire::{LayoutRecord, NodeRecord, WorkspaceRecord};

use tracing::{debug, info, warn};

use crate::workspace::Workspace;

/// Storage key of the workspace record.
pub const WORKSPACE_KEY: &str = "oneai.workspace.v1";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("storage error: {0}")]
    Store(String),

    #[error("corrupt workspace record: {0}")]
    Corrupt(String),
}

/// Serialize and store the workspace.
pub fn try_save(store: &dyn KeyValueStore, workspace: &Workspace) -> Result<(), PersistenceError> {
    let record = WorkspaceRecord::from_workspace(workspace);
    let json = serde_json::to_string(&record)
        .map_err(|e| PersistenceError::Store(format!("failed to serialize workspace: {e}")))?;
    store.set(WORKSPACE_KEY, &json)
}

/// Best-effort save; failures are logged and swallowed.
pub fn save(store: &dyn KeyValueStore, workspace: &Workspace) {
    match try_save(store, workspace) {
        Ok(()) => debug!(tabs = workspace.tabs().len(), "Workspace saved"),
        Err(e) => warn!(error = %e, "Failed to save workspace"),
    }
}

/// Read and validate the stored workspace. `Ok(None)` when nothing is stored.
pub fn try_load(store: &dyn KeyValueStore) -> Result<Option<Workspace>, PersistenceError> {
    let Some(raw) = store.get(WORKSPACE_KEY)? else {
        return Ok(None);
    };
    let record: WorkspaceRecord =
        serde_json::from_str(&raw).map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
    record
        .into_workspace()
        .map(Some)
        .map_err(|e| PersistenceError::Corrupt(e.to_string()))
}

/// Load the stored workspace, or the built-in default when the record is
/// missing, unreadable, or inconsistent.
pub fn load(store: &dyn KeyValueStore) -> Workspace {
    match try_load(store) {
        Ok(Some(workspace)) => {
            info!(
                tabs = workspace.tabs().len(),
                panes = workspace.layout().leaf_count(),
                "Restored workspace"
            );
            workspace
        }
        Ok(None) => {
            info!("No saved workspace, using default");
            Workspace::builtin_default()
        }
        Err(e) => {
            warn!(error = %e, "Discarding saved workspace, using default");
            Workspace::builtin_default()
        }
    }
}

/// Remove the stored record so the next `load` yields the default.
pub fn clear(store: &dyn KeyValueStore) -> Result<(), PersistenceError> {
    store.remove(WORKSPACE_KEY)
}
