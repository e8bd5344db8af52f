//! Mutating operations on the layout tree: split, remove, resize, move.

use oneai_common::prefixed_id;

use super::{
    check_ratios, equalize, normalize, Direction, LayoutError, LayoutNode, LayoutTree, NodeEntry,
    NodeId, Position, RatioPolicy, TabId, RESIZE_EPSILON,
};

impl LayoutTree {
    /// Place `tab_id` as the only leaf of an empty tree.
    pub fn attach_root(&mut self, tab_id: impl Into<TabId>) -> Result<NodeId, LayoutError> {
        if self.root.is_some() {
            return Err(LayoutError::NotEmpty);
        }
        let id = self.fresh_id("pane");
        self.nodes.insert(
            id.clone(),
            NodeEntry {
                node: LayoutNode::Leaf {
                    tab_id: tab_id.into(),
                },
                parent: None,
            },
        );
        self.root = Some(id.clone());
        Ok(id)
    }

    /// Turn the leaf `leaf_id` into a split holding the existing leaf and a
    /// new leaf for `new_tab_id`, each at ratio 0.5. Returns the new leaf id.
    pub fn split_leaf(
        &mut self,
        leaf_id: &str,
        direction: Direction,
        new_tab_id: impl Into<TabId>,
        position: Position,
    ) -> Result<NodeId, LayoutError> {
        let new_tab_id = new_tab_id.into();
        let parent = self.leaf_entry(leaf_id)?.parent.clone();
        self.ensure_unplaced(&new_tab_id)?;

        let split_id = self.fresh_id("split");
        let new_leaf_id = self.fresh_id("pane");
        let children = match position {
            Position::Before => vec![new_leaf_id.clone(), leaf_id.to_string()],
            Position::After => vec![leaf_id.to_string(), new_leaf_id.clone()],
        };

        self.replace_child(parent.as_deref(), leaf_id, &split_id);
        self.nodes.insert(
            split_id.clone(),
            NodeEntry {
                node: LayoutNode::Split {
                    direction,
                    children,
                    ratios: vec![0.5, 0.5],
                },
                parent,
            },
        );
        self.nodes.insert(
            new_leaf_id.clone(),
            NodeEntry {
                node: LayoutNode::Leaf { tab_id: new_tab_id },
                parent: Some(split_id.clone()),
            },
        );
        self.set_parent(leaf_id, Some(split_id));
        Ok(new_leaf_id)
    }

    /// Insert a new leaf for `tab_id` at `index` among the children of
    /// `split_id`. Returns the new leaf id.
    pub fn insert_leaf(
        &mut self,
        split_id: &str,
        index: usize,
        tab_id: impl Into<TabId>,
        policy: RatioPolicy,
    ) -> Result<NodeId, LayoutError> {
        let tab_id = tab_id.into();
        let child_count = self.split_len(split_id)?;
        if index > child_count {
            return Err(LayoutError::InvalidMove(format!(
                "index {index} out of range for {split_id} with {child_count} children"
            )));
        }
        self.ensure_unplaced(&tab_id)?;

        let leaf_id = self.fresh_id("pane");
        self.nodes.insert(
            leaf_id.clone(),
            NodeEntry {
                node: LayoutNode::Leaf { tab_id },
                parent: None,
            },
        );
        self.insert_child(split_id, index, &leaf_id, policy);
        Ok(leaf_id)
    }

    /// Remove a leaf and return the tab it held.
    ///
    /// Sibling ratios are renormalized; a split left with one child is
    /// replaced by that child. Removing the root leaf empties the tree.
    pub fn remove_leaf(&mut self, leaf_id: &str) -> Result<TabId, LayoutError> {
        let tab_id = match &self.leaf_entry(leaf_id)?.node {
            LayoutNode::Leaf { tab_id } => tab_id.clone(),
            LayoutNode::Split { .. } => return Err(LayoutError::NotALeaf(leaf_id.to_string())),
        };
        self.detach(leaf_id);
        self.nodes.remove(leaf_id);
        Ok(tab_id)
    }

    /// Replace the ratios of `split_id`. Accepted ratios are normalized.
    pub fn resize(&mut self, split_id: &str, new_ratios: &[f64]) -> Result<(), LayoutError> {
        let child_count = self.split_len(split_id)?;
        if new_ratios.len() != child_count {
            return Err(LayoutError::InvalidRatios(format!(
                "expected {child_count} ratios, got {}",
                new_ratios.len()
            )));
        }
        check_ratios(new_ratios, RESIZE_EPSILON).map_err(LayoutError::InvalidRatios)?;

        if let Some(LayoutNode::Split { ratios, .. }) = self.node_mut(split_id) {
            *ratios = new_ratios.to_vec();
            normalize(ratios);
        }
        Ok(())
    }

    /// Move a leaf to `index` among the children of `dest_split_id`.
    ///
    /// Moving within the leaf's own parent reorders in place; `Preserve`
    /// keeps each child's ratio attached to it. Otherwise the leaf is
    /// detached (collapsing its old parent if needed) and inserted under the
    /// destination according to `policy`.
    pub fn move_leaf(
        &mut self,
        leaf_id: &str,
        dest_split_id: &str,
        index: usize,
        policy: RatioPolicy,
    ) -> Result<(), LayoutError> {
        let parent = self
            .leaf_entry(leaf_id)?
            .parent
            .clone()
            .ok_or_else(|| LayoutError::InvalidMove(format!("{leaf_id} is the root")))?;
        let dest_len = match self.node(dest_split_id) {
            None => return Err(LayoutError::NodeNotFound(dest_split_id.to_string())),
            Some(LayoutNode::Leaf { .. }) => {
                return Err(LayoutError::InvalidMove(format!(
                    "destination {dest_split_id} is not a split"
                )))
            }
            Some(LayoutNode::Split { children, .. }) => children.len(),
        };

        if parent == dest_split_id {
            if index >= dest_len {
                return Err(LayoutError::InvalidMove(format!(
                    "index {index} out of range for {dest_split_id} with {dest_len} children"
                )));
            }
            if let Some(LayoutNode::Split {
                children, ratios, ..
            }) = self.node_mut(dest_split_id)
            {
                if let Some(from) = children.iter().position(|c| c == leaf_id) {
                    let child = children.remove(from);
                    let ratio = ratios.remove(from);
                    children.insert(index, child);
                    ratios.insert(index, ratio);
                }
                if policy == RatioPolicy::Equalize {
                    equalize(ratios);
                }
            }
            return Ok(());
        }

        if index > dest_len {
            return Err(LayoutError::InvalidMove(format!(
                "index {index} out of range for {dest_split_id} with {dest_len} children"
            )));
        }
        self.detach(leaf_id);
        self.insert_child(dest_split_id, index, leaf_id, policy);
        Ok(())
    }

    // -- internals --

    pub(crate) fn fresh_id(&self, prefix: &str) -> NodeId {
        loop {
            let id = prefixed_id(prefix);
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }

    fn leaf_entry(&self, leaf_id: &str) -> Result<&NodeEntry, LayoutError> {
        let entry = self
            .nodes
            .get(leaf_id)
            .ok_or_else(|| LayoutError::NodeNotFound(leaf_id.to_string()))?;
        if !entry.node.is_leaf() {
            return Err(LayoutError::NotALeaf(leaf_id.to_string()));
        }
        Ok(entry)
    }

    fn split_len(&self, split_id: &str) -> Result<usize, LayoutError> {
        match self.node(split_id) {
            None => Err(LayoutError::NodeNotFound(split_id.to_string())),
            Some(LayoutNode::Leaf { .. }) => Err(LayoutError::NotASplit(split_id.to_string())),
            Some(LayoutNode::Split { children, .. }) => Ok(children.len()),
        }
    }

    fn ensure_unplaced(&self, tab_id: &str) -> Result<(), LayoutError> {
        if self.leaf_for_tab(tab_id).is_some() {
            return Err(LayoutError::TabAlreadyPlaced(tab_id.to_string()));
        }
        Ok(())
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut LayoutNode> {
        self.nodes.get_mut(id).map(|e| &mut e.node)
    }

    fn set_parent(&mut self, id: &str, parent: Option<NodeId>) {
        if let Some(entry) = self.nodes.get_mut(id) {
            entry.parent = parent;
        }
    }

    /// Make whatever referenced `old` (its parent split, or the root slot)
    /// reference `new` instead. The ratio slot is reused.
    fn replace_child(&mut self, parent: Option<&str>, old: &str, new: &str) {
        match parent {
            None => self.root = Some(new.to_string()),
            Some(parent_id) => {
                if let Some(LayoutNode::Split { children, .. }) = self.node_mut(parent_id) {
                    if let Some(slot) = children.iter_mut().find(|c| c.as_str() == old) {
                        *slot = new.to_string();
                    }
                }
            }
        }
    }

    fn unlink_child(&mut self, parent_id: &str, child_id: &str) {
        if let Some(LayoutNode::Split {
            children, ratios, ..
        }) = self.node_mut(parent_id)
        {
            if let Some(idx) = children.iter().position(|c| c == child_id) {
                children.remove(idx);
                ratios.remove(idx);
                normalize(ratios);
            }
        }
    }

    fn insert_child(&mut self, split_id: &str, index: usize, child_id: &str, policy: RatioPolicy) {
        if let Some(LayoutNode::Split {
            children, ratios, ..
        }) = self.node_mut(split_id)
        {
            let n = children.len() as f64;
            children.insert(index, child_id.to_string());
            match policy {
                RatioPolicy::Equalize => {
                    ratios.insert(index, 0.0);
                    equalize(ratios);
                }
                RatioPolicy::Preserve => {
                    for r in ratios.iter_mut() {
                        *r *= n / (n + 1.0);
                    }
                    ratios.insert(index, 1.0 / (n + 1.0));
                    normalize(ratios);
                }
            }
        }
        self.set_parent(child_id, Some(split_id.to_string()));
    }

    /// Unlink `node_id` from its parent (or the root slot) without deleting
    /// it, then collapse any split left with fewer than two children.
    fn detach(&mut self, node_id: &str) {
        let Some(parent_id) = self.parent_of(node_id).cloned() else {
            if self.root.as_deref() == Some(node_id) {
                self.root = None;
            }
            return;
        };
        self.unlink_child(&parent_id, node_id);
        self.set_parent(node_id, None);
        self.collapse(&parent_id);
    }

    /// Walk upward from `split_id`, replacing single-child splits by their
    /// child and dropping empty ones.
    fn collapse(&mut self, split_id: &str) {
        let mut current = Some(split_id.to_string());
        while let Some(id) = current.take() {
            let Some(entry) = self.nodes.get(&id) else {
                break;
            };
            let LayoutNode::Split { children, .. } = &entry.node else {
                break;
            };
            if children.len() >= 2 {
                break;
            }
            let only_child = children.first().cloned();
            let grandparent = entry.parent.clone();
            self.nodes.remove(&id);
            match only_child {
                Some(child) => {
                    self.replace_child(grandparent.as_deref(), &id, &child);
                    self.set_parent(&child, grandparent.clone());
                }
                None => match grandparent.as_deref() {
                    Some(gp) => self.unlink_child(gp, &id),
                    None => self.root = None,
                },
            }
            current = grandparent;
        }
    }
}
