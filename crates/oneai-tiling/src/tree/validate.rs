//! Structural validation of a layout tree.

use std::collections::HashSet;

use super::{check_ratios, LayoutError, LayoutNode, LayoutTree, RATIO_EPSILON};

impl LayoutTree {
    /// Check every structural invariant: a single acyclic root, consistent
    /// parent links, splits with at least two children and well-formed
    /// ratios, and no tab placed twice.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let Some(root) = &self.root else {
            if self.nodes.is_empty() {
                return Ok(());
            }
            return Err(LayoutError::Inconsistent(format!(
                "{} nodes but no root",
                self.nodes.len()
            )));
        };
        match self.nodes.get(root) {
            None => {
                return Err(LayoutError::Inconsistent(format!("root {root} does not exist")));
            }
            Some(entry) if entry.parent.is_some() => {
                return Err(LayoutError::Inconsistent(format!("root {root} has a parent")));
            }
            Some(_) => {}
        }

        let mut visited = HashSet::new();
        let mut placed = HashSet::new();
        let mut stack = vec![root.clone()];
        while let Some(id) = stack.pop() {
            if !visited.insert(id.clone()) {
                return Err(LayoutError::Inconsistent(format!("node {id} is reachable twice")));
            }
            let Some(entry) = self.nodes.get(&id) else {
                return Err(LayoutError::Inconsistent(format!("dangling node {id}")));
            };
            match &entry.node {
                LayoutNode::Leaf { tab_id } => {
                    if !placed.insert(tab_id.as_str()) {
                        return Err(LayoutError::TabAlreadyPlaced(tab_id.clone()));
                    }
                }
                LayoutNode::Split {
                    children, ratios, ..
                } => {
                    if children.len() < 2 {
                        return Err(LayoutError::Inconsistent(format!(
                            "split {id} has {} children",
                            children.len()
                        )));
                    }
                    if ratios.len() != children.len() {
                        return Err(LayoutError::InvalidRatios(format!(
                            "split {id} has {} ratios for {} children",
                            ratios.len(),
                            children.len()
                        )));
                    }
                    check_ratios(ratios, RATIO_EPSILON)
                        .map_err(|msg| LayoutError::InvalidRatios(format!("split {id}: {msg}")))?;
                    for child in children {
                        match self.nodes.get(child) {
                            None => {
                                return Err(LayoutError::Inconsistent(format!(
                                    "split {id} references missing node {child}"
                                )));
                            }
                            Some(c) if c.parent.as_deref() != Some(id.as_str()) => {
                                return Err(LayoutError::Inconsistent(format!(
                                    "node {child} does not point back to parent {id}"
                                )));
                            }
                            Some(_) => stack.push(child.clone()),
                        }
                    }
                }
            }
        }

        if visited.len() != self.nodes.len() {
            return Err(LayoutError::Inconsistent(format!(
                "{} nodes unreachable from root",
                self.nodes.len() - visited.len()
            )));
        }
        Ok(())
    }
}
