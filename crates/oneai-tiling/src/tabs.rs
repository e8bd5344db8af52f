//! Ordered registry of open tabs.
//!
//! A tab binds an application id to a title. Leaves of the layout tree hold
//! tab ids only; a registered tab that no leaf references is detached.

use serde::{Deserialize, Serialize};

use crate::tree::TabId;
use crate::workspace::WorkspaceError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub app_id: String,
    pub title: String,
    /// Creation time in epoch milliseconds, strictly increasing per registry.
    #[serde(default)]
    pub created_at: u64,
}

/// Latest creation time a stored tab may carry: the largest epoch
/// millisecond value a signed 64-bit timestamp can hold.
pub const MAX_CREATED_AT: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Default)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
    last_created_at: u64,
}

impl PartialEq for TabRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.tabs == other.tabs
    }
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from stored tabs, keeping their order.
    pub fn from_tabs(tabs: Vec<Tab>) -> Result<Self, WorkspaceError> {
        let mut registry = Self::new();
        for tab in tabs {
            if registry.contains(&tab.id) {
                return Err(WorkspaceError::DuplicateTab(tab.id));
            }
            if tab.created_at > MAX_CREATED_AT {
                return Err(WorkspaceError::InvalidCreatedAt {
                    tab_id: tab.id,
                    created_at: tab.created_at,
                });
            }
            registry.last_created_at = registry.last_created_at.max(tab.created_at);
            registry.tabs.push(tab);
        }
        Ok(registry)
    }

    /// Register a new tab at the end of the list and return a copy of it.
    pub fn open(&mut self, app_id: &str, title: impl Into<String>) -> Tab {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let mut created_at = now.max(self.last_created_at.saturating_add(1));
        let mut id = format!("{app_id}-{created_at}");
        while self.contains(&id) {
            created_at = created_at.saturating_add(1);
            id = format!("{app_id}-{created_at}");
        }
        self.last_created_at = created_at;

        let tab = Tab {
            id,
            app_id: app_id.to_string(),
            title: title.into(),
            created_at,
        };
        self.tabs.push(tab.clone());
        tab
    }

    /// Drop a tab from the registry. Callers check placement first.
    pub fn close(&mut self, tab_id: &str) -> Result<Tab, WorkspaceError> {
        let idx = self
            .position(tab_id)
            .ok_or_else(|| WorkspaceError::UnknownTab(tab_id.to_string()))?;
        Ok(self.tabs.remove(idx))
    }

    pub fn rename(&mut self, tab_id: &str, title: impl Into<String>) -> Result<(), WorkspaceError> {
        let tab = self
            .tabs
            .iter_mut()
            .find(|t| t.id == tab_id)
            .ok_or_else(|| WorkspaceError::UnknownTab(tab_id.to_string()))?;
        tab.title = title.into();
        Ok(())
    }

    pub fn get(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    pub fn contains(&self, tab_id: &str) -> bool {
        self.get(tab_id).is_some()
    }

    pub fn position(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn as_slice(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
