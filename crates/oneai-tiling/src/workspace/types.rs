//! Core workspace type, its error, and accessors.

use crate::tabs::{Tab, TabRegistry};
use crate::tree::{LayoutError, LayoutTree, TabId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkspaceError {
    #[error("unknown tab: {0}")]
    UnknownTab(TabId),

    #[error("unknown app: {0}")]
    UnknownApp(String),

    #[error("tab {0} is still placed in the layout")]
    TabStillPlaced(TabId),

    #[error("duplicate tab id: {0}")]
    DuplicateTab(TabId),

    #[error("tab {tab_id} has out-of-range creation time {created_at}")]
    InvalidCreatedAt { tab_id: TabId, created_at: u64 },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// The layout tree, the tab registry, and the active tab.
///
/// All mutation happens through `&mut Workspace` on one thread; each
/// operation runs to completion and leaves the workspace valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub(super) layout: LayoutTree,
    pub(super) tabs: TabRegistry,
    pub(super) active_tab_id: Option<TabId>,
}

impl Workspace {
    /// A workspace with no tabs and an empty layout.
    pub fn empty() -> Self {
        Self {
            layout: LayoutTree::new(),
            tabs: TabRegistry::new(),
            active_tab_id: None,
        }
    }

    /// Assemble a workspace from stored parts, rejecting any inconsistency.
    pub fn from_parts(
        layout: LayoutTree,
        tabs: TabRegistry,
        active_tab_id: Option<TabId>,
    ) -> Result<Self, WorkspaceError> {
        let workspace = Self {
            layout,
            tabs,
            active_tab_id,
        };
        workspace.validate()?;
        Ok(workspace)
    }

    pub fn layout(&self) -> &LayoutTree {
        &self.layout
    }

    pub fn tabs(&self) -> &TabRegistry {
        &self.tabs
    }

    pub fn active_tab_id(&self) -> Option<&TabId> {
        self.active_tab_id.as_ref()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.as_deref().and_then(|id| self.tabs.get(id))
    }

    /// Tab ids in the order their panes appear on screen.
    pub fn visible_tab_ids(&self) -> Vec<TabId> {
        self.layout.tab_ids()
    }

    pub fn is_placed(&self, tab_id: &str) -> bool {
        self.layout.leaf_for_tab(tab_id).is_some()
    }

    /// Check the layout invariants plus every cross-reference between the
    /// layout, the registry, and the active tab.
    pub fn validate(&self) -> Result<(), WorkspaceError> {
        self.layout.validate()?;
        for tab_id in self.layout.tab_ids() {
            if !self.tabs.contains(&tab_id) {
                return Err(WorkspaceError::UnknownTab(tab_id));
            }
        }
        for (i, tab) in self.tabs.iter().enumerate() {
            if self.tabs.position(&tab.id) != Some(i) {
                return Err(WorkspaceError::DuplicateTab(tab.id.clone()));
            }
        }
        if let Some(active) = &self.active_tab_id {
            if !self.tabs.contains(active) {
                return Err(WorkspaceError::UnknownTab(active.clone()));
            }
        }
        Ok(())
    }
}
