//! Read-only traversal: leaf order, tab lookup, and cyclic neighbors.

use super::{LayoutNode, LayoutTree, NodeId, TabId};

impl LayoutTree {
    /// All leaves as `(leaf_id, tab_id)` in depth-first, left-to-right order.
    pub fn leaves(&self) -> Vec<(NodeId, TabId)> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            self.collect_leaves(root, &mut out);
        }
        out
    }

    fn collect_leaves(&self, id: &str, out: &mut Vec<(NodeId, TabId)>) {
        match self.node(id) {
            Some(LayoutNode::Leaf { tab_id }) => out.push((id.to_string(), tab_id.clone())),
            Some(LayoutNode::Split { children, .. }) => {
                for child in children {
                    self.collect_leaves(child, out);
                }
            }
            None => {}
        }
    }

    /// Tab ids in leaf order.
    pub fn tab_ids(&self) -> Vec<TabId> {
        self.leaves().into_iter().map(|(_, tab)| tab).collect()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.values().filter(|e| e.node.is_leaf()).count()
    }

    /// The leaf currently holding `tab_id`, if the tab is placed.
    pub fn leaf_for_tab(&self, tab_id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, e)| e.node.tab_id() == Some(tab_id))
            .map(|(id, _)| id.clone())
    }

    /// The leaf after `leaf_id` in leaf order, wrapping around.
    /// `None` for a single-leaf tree or an unknown leaf.
    pub fn next_leaf(&self, leaf_id: &str) -> Option<NodeId> {
        let ids = self.leaves();
        if ids.len() <= 1 {
            return None;
        }
        let idx = ids.iter().position(|(id, _)| id == leaf_id)?;
        Some(ids[(idx + 1) % ids.len()].0.clone())
    }

    /// The leaf before `leaf_id` in leaf order, wrapping around.
    pub fn prev_leaf(&self, leaf_id: &str) -> Option<NodeId> {
        let ids = self.leaves();
        if ids.len() <= 1 {
            return None;
        }
        let idx = ids.iter().position(|(id, _)| id == leaf_id)?;
        Some(ids[(idx + ids.len() - 1) % ids.len()].0.clone())
    }
}
