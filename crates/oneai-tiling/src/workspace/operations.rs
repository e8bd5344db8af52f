//! Tab lifecycle and pane operations on the workspace.

use oneai_config::AppCatalog;
use tracing::debug;

use crate::tabs::Tab;
use crate::tree::{Direction, LayoutError, LayoutNode, Position, RatioPolicy, TabId};

use super::{Workspace, WorkspaceError};

impl Workspace {
    /// Open a tab for `app_id` and place it at the end of the root split
    /// (or as the root leaf of an empty layout). The new tab becomes active.
    pub fn open_app(&mut self, catalog: &AppCatalog, app_id: &str) -> Result<TabId, WorkspaceError> {
        if !catalog.contains(app_id) {
            return Err(WorkspaceError::UnknownApp(app_id.to_string()));
        }
        let tab = self.tabs.open(app_id, catalog.default_title(app_id));
        if let Err(e) = self.place(&tab.id) {
            self.tabs.close(&tab.id)?;
            return Err(e);
        }
        debug!(tab_id = %tab.id, app_id, "Opened tab");
        self.active_tab_id = Some(tab.id.clone());
        Ok(tab.id)
    }

    /// Open a tab for `app_id` by splitting the pane that shows `target_tab_id`.
    pub fn split_pane(
        &mut self,
        catalog: &AppCatalog,
        target_tab_id: &str,
        direction: Direction,
        app_id: &str,
        position: Position,
    ) -> Result<TabId, WorkspaceError> {
        if !catalog.contains(app_id) {
            return Err(WorkspaceError::UnknownApp(app_id.to_string()));
        }
        let leaf_id = self.leaf_of(target_tab_id)?;
        let tab = self.tabs.open(app_id, catalog.default_title(app_id));
        if let Err(e) = self
            .layout
            .split_leaf(&leaf_id, direction, tab.id.clone(), position)
        {
            self.tabs.close(&tab.id)?;
            return Err(e.into());
        }
        debug!(tab_id = %tab.id, target = target_tab_id, ?direction, "Split pane");
        self.active_tab_id = Some(tab.id.clone());
        Ok(tab.id)
    }

    /// Remove a tab's pane (if any) and drop the tab. When the closed tab was
    /// active, the pane that took its place on screen becomes active.
    pub fn close_tab(&mut self, tab_id: &str) -> Result<Tab, WorkspaceError> {
        if !self.tabs.contains(tab_id) {
            return Err(WorkspaceError::UnknownTab(tab_id.to_string()));
        }
        let was_active = self.active_tab_id.as_deref() == Some(tab_id);
        let visible_index = self.visible_tab_ids().iter().position(|t| t == tab_id);
        self.detach_tab(tab_id)?;
        let tab = self.forget_tab(tab_id)?;

        if was_active {
            let visible = self.visible_tab_ids();
            self.active_tab_id = match visible_index {
                Some(idx) if !visible.is_empty() => Some(visible[idx.min(visible.len() - 1)].clone()),
                _ => visible
                    .first()
                    .cloned()
                    .or_else(|| self.tabs.iter().next().map(|t| t.id.clone())),
            };
        }
        debug!(tab_id, active = ?self.active_tab_id, "Closed tab");
        Ok(tab)
    }

    /// Take a tab's pane out of the layout, keeping the tab registered.
    pub fn detach_tab(&mut self, tab_id: &str) -> Result<(), WorkspaceError> {
        if !self.tabs.contains(tab_id) {
            return Err(WorkspaceError::UnknownTab(tab_id.to_string()));
        }
        if let Some(leaf_id) = self.layout.leaf_for_tab(tab_id) {
            self.layout.remove_leaf(&leaf_id)?;
        }
        Ok(())
    }

    /// Put a detached tab back on screen at the end of the root split.
    pub fn attach_tab(&mut self, tab_id: &str) -> Result<(), WorkspaceError> {
        if !self.tabs.contains(tab_id) {
            return Err(WorkspaceError::UnknownTab(tab_id.to_string()));
        }
        self.place(tab_id)
    }

    /// Drop a detached tab from the registry.
    pub fn forget_tab(&mut self, tab_id: &str) -> Result<Tab, WorkspaceError> {
        if self.is_placed(tab_id) {
            return Err(WorkspaceError::TabStillPlaced(tab_id.to_string()));
        }
        let tab = self.tabs.close(tab_id)?;
        if self.active_tab_id.as_deref() == Some(tab_id) {
            self.active_tab_id = None;
        }
        Ok(tab)
    }

    pub fn rename_tab(&mut self, tab_id: &str, title: impl Into<String>) -> Result<(), WorkspaceError> {
        self.tabs.rename(tab_id, title)
    }

    pub fn set_active(&mut self, tab_id: &str) -> Result<(), WorkspaceError> {
        if !self.tabs.contains(tab_id) {
            return Err(WorkspaceError::UnknownTab(tab_id.to_string()));
        }
        self.active_tab_id = Some(tab_id.to_string());
        Ok(())
    }

    pub fn resize_split(&mut self, split_id: &str, ratios: &[f64]) -> Result<(), WorkspaceError> {
        Ok(self.layout.resize(split_id, ratios)?)
    }

    /// Move the pane showing `tab_id` under `dest_split_id` at `index`.
    pub fn move_tab(
        &mut self,
        tab_id: &str,
        dest_split_id: &str,
        index: usize,
        policy: RatioPolicy,
    ) -> Result<(), WorkspaceError> {
        let leaf_id = self.leaf_of(tab_id)?;
        Ok(self.layout.move_leaf(&leaf_id, dest_split_id, index, policy)?)
    }

    fn leaf_of(&self, tab_id: &str) -> Result<String, WorkspaceError> {
        if !self.tabs.contains(tab_id) {
            return Err(WorkspaceError::UnknownTab(tab_id.to_string()));
        }
        self.layout
            .leaf_for_tab(tab_id)
            .ok_or_else(|| LayoutError::NodeNotFound(tab_id.to_string()).into())
    }

    /// Root leaf for an empty layout, appended child of a root split, or a
    /// horizontal split of a root leaf.
    fn place(&mut self, tab_id: &str) -> Result<(), WorkspaceError> {
        let Some(root) = self.layout.root().cloned() else {
            self.layout.attach_root(tab_id)?;
            return Ok(());
        };
        match self.layout.node(&root) {
            Some(LayoutNode::Split { children, .. }) => {
                let end = children.len();
                self.layout
                    .insert_leaf(&root, end, tab_id, RatioPolicy::Equalize)?;
            }
            _ => {
                self.layout
                    .split_leaf(&root, Direction::Horizontal, tab_id, Position::After)?;
            }
        }
        Ok(())
    }
}
