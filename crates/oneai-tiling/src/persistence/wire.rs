//! JSON record shapes for the persisted workspace.
//!
//! The layout is stored flat, one entry per node in depth-first order with
//! splits naming their children by id, so record depth stays constant no
//! matter how deeply panes are nested.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::tabs::{Tab, TabRegistry};
use crate::tree::{Direction, LayoutError, LayoutNode, LayoutTree, NodeId, TabId};
use crate::workspace::{Workspace, WorkspaceError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeRecord {
    Split {
        id: NodeId,
        direction: Direction,
        children: Vec<NodeId>,
        /// Missing sizes mean equal shares.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        sizes: Vec<f64>,
    },
    Single {
        id: NodeId,
        #[serde(rename = "tabId")]
        tab_id: TabId,
    },
}

impl NodeRecord {
    fn id(&self) -> &NodeId {
        match self {
            NodeRecord::Split { id, .. } | NodeRecord::Single { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRecord {
    pub root: NodeId,
    pub nodes: Vec<NodeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRecord {
    pub layout: Option<LayoutRecord>,
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub active_tab_id: Option<TabId>,
}

impl WorkspaceRecord {
    pub fn from_workspace(workspace: &Workspace) -> Self {
        Self {
            layout: LayoutRecord::from_tree(workspace.layout()),
            tabs: workspace.tabs().as_slice().to_vec(),
            active_tab_id: workspace.active_tab_id().cloned(),
        }
    }

    pub fn into_workspace(self) -> Result<Workspace, WorkspaceError> {
        let layout = match self.layout {
            Some(record) => record.into_tree()?,
            None => LayoutTree::new(),
        };
        let tabs = TabRegistry::from_tabs(self.tabs)?;
        Workspace::from_parts(layout, tabs, self.active_tab_id)
    }
}

impl LayoutRecord {
    /// Flatten a tree in depth-first order. `None` for an empty tree.
    pub fn from_tree(tree: &LayoutTree) -> Option<Self> {
        let root = tree.root()?.clone();
        let mut nodes = Vec::with_capacity(tree.node_count());
        let mut stack = vec![root.clone()];
        while let Some(id) = stack.pop() {
            match tree.node(&id) {
                Some(LayoutNode::Split {
                    direction,
                    children,
                    ratios,
                }) => {
                    stack.extend(children.iter().rev().cloned());
                    nodes.push(NodeRecord::Split {
                        id,
                        direction: *direction,
                        children: children.clone(),
                        sizes: ratios.clone(),
                    });
                }
                Some(LayoutNode::Leaf { tab_id }) => nodes.push(NodeRecord::Single {
                    id,
                    tab_id: tab_id.clone(),
                }),
                None => {}
            }
        }
        Some(Self { root, nodes })
    }

    /// Rebuild the arena. Parent links come from the children lists; the
    /// result still needs `validate`.
    pub fn into_tree(self) -> Result<LayoutTree, LayoutError> {
        let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
        for node in &self.nodes {
            if let NodeRecord::Split { id, children, .. } = node {
                for child in children {
                    if parents.insert(child.clone(), id.clone()).is_some() {
                        return Err(LayoutError::Inconsistent(format!(
                            "node {child} has more than one parent"
                        )));
                    }
                }
            }
        }

        let parts = self.nodes.into_iter().map(|node| {
            let parent = parents.get(node.id()).cloned();
            match node {
                NodeRecord::Single { id, tab_id } => (id, LayoutNode::Leaf { tab_id }, parent),
                NodeRecord::Split {
                    id,
                    direction,
                    children,
                    sizes,
                } => {
                    let ratios = if sizes.is_empty() && !children.is_empty() {
                        vec![1.0 / children.len() as f64; children.len()]
                    } else {
                        sizes
                    };
                    (
                        id,
                        LayoutNode::Split {
                            direction,
                            children,
                            ratios,
                        },
                        parent,
                    )
                }
            }
        });
        LayoutTree::from_parts(Some(self.root), parts)
    }
}
