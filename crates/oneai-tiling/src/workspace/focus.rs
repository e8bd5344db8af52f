//! Active-tab cycling across visible panes.

use super::Workspace;

impl Workspace {
    /// Make the next visible pane's tab active, wrapping around.
    pub fn focus_next(&mut self) -> bool {
        self.focus_step(true)
    }

    /// Make the previous visible pane's tab active, wrapping around.
    pub fn focus_prev(&mut self) -> bool {
        self.focus_step(false)
    }

    fn focus_step(&mut self, forward: bool) -> bool {
        let visible = self.visible_tab_ids();
        if visible.is_empty() {
            return false;
        }
        let current = self
            .active_tab_id
            .as_ref()
            .and_then(|active| visible.iter().position(|t| t == active));
        let next = match current {
            Some(idx) if forward => (idx + 1) % visible.len(),
            Some(idx) => (idx + visible.len() - 1) % visible.len(),
            None => 0,
        };
        let changed = current != Some(next);
        self.active_tab_id = Some(visible[next].clone());
        changed
    }
}
