//! Arena-backed pane layout tree.
//!
//! Nodes live in a flat map keyed by generated ids; each entry records its
//! parent so edits can walk upward without recursion. Every public mutator
//! either succeeds completely or returns an error with the tree untouched.

mod operations;
mod traversal;
mod types;
mod validate;

#[cfg(test)]
mod tests;

pub use types::*;

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a tree from explicit nodes, keeping their ids.
    ///
    /// Each tuple is `(id, node, parent)`. The result is not validated; call
    /// [`LayoutTree::validate`] before trusting it.
    pub fn from_parts(
        root: Option<NodeId>,
        parts: impl IntoIterator<Item = (NodeId, LayoutNode, Option<NodeId>)>,
    ) -> Result<Self, LayoutError> {
        let mut tree = Self::new();
        for (id, node, parent) in parts {
            if tree.nodes.contains_key(&id) {
                return Err(LayoutError::Inconsistent(format!("duplicate node id {id}")));
            }
            tree.nodes.insert(id, NodeEntry { node, parent });
        }
        tree.root = root;
        Ok(tree)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&NodeId> {
        self.root.as_ref()
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.get(id).map(|e| &e.node)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn parent_of(&self, id: &str) -> Option<&NodeId> {
        self.nodes.get(id).and_then(|e| e.parent.as_ref())
    }
}

/// Scale `ratios` so they sum to one. Degenerate input becomes equal shares.
pub(crate) fn normalize(ratios: &mut [f64]) {
    if ratios.is_empty() {
        return;
    }
    let sum: f64 = ratios.iter().sum();
    if sum.is_finite() && sum > 0.0 {
        for r in ratios.iter_mut() {
            *r /= sum;
        }
    } else {
        equalize(ratios);
    }
}

pub(crate) fn equalize(ratios: &mut [f64]) {
    let share = 1.0 / ratios.len() as f64;
    for r in ratios.iter_mut() {
        *r = share;
    }
}

/// Check that every ratio is positive and finite and that they sum to one
/// within `tolerance`.
pub(crate) fn check_ratios(ratios: &[f64], tolerance: f64) -> Result<(), String> {
    if let Some(bad) = ratios.iter().find(|r| !r.is_finite() || **r <= 0.0) {
        return Err(format!("ratio {bad} must be positive and finite"));
    }
    let sum: f64 = ratios.iter().sum();
    if (sum - 1.0).abs() > tolerance {
        return Err(format!("ratios sum to {sum}, expected 1"));
    }
    Ok(())
}
