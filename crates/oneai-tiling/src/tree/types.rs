//! Core types for the layout tree: ids, directions, nodes, and errors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier of a node in the layout arena.
pub type NodeId = String;

/// Identifier of a tab in the tab registry.
pub type TabId = String;

/// Tolerance for a stored ratio vector summing to one.
pub const RATIO_EPSILON: f64 = 1e-9;

/// Tolerance accepted from callers of `resize`.
pub const RESIZE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Children are laid out side by side.
    Horizontal,
    /// Children are stacked top to bottom.
    Vertical,
}

/// Where a new leaf goes relative to the leaf being split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    Before,
    #[default]
    After,
}

/// How sibling ratios are redistributed when a child is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatioPolicy {
    /// Every child gets an equal share.
    #[default]
    Equalize,
    /// The new child gets `1/(n+1)`; existing shares scale by `n/(n+1)`.
    Preserve,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    Split {
        direction: Direction,
        children: Vec<NodeId>,
        ratios: Vec<f64>,
    },
    Leaf {
        tab_id: TabId,
    },
}

impl LayoutNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, LayoutNode::Leaf { .. })
    }

    pub fn tab_id(&self) -> Option<&str> {
        match self {
            LayoutNode::Leaf { tab_id } => Some(tab_id),
            LayoutNode::Split { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeEntry {
    pub node: LayoutNode,
    pub parent: Option<NodeId>,
}

/// Arena-backed recursive split tree. Leaves reference tabs by id.
///
/// An empty tree (no root) is valid and renders nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutTree {
    pub(crate) nodes: HashMap<NodeId, NodeEntry>,
    pub(crate) root: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("layout node {0} is not a leaf")]
    NotALeaf(NodeId),

    #[error("layout node {0} is not a split")]
    NotASplit(NodeId),

    #[error("invalid ratios: {0}")]
    InvalidRatios(String),

    #[error("invalid move: {0}")]
    InvalidMove(String),

    #[error("tab {0} is already placed in the layout")]
    TabAlreadyPlaced(TabId),

    #[error("layout already has a root")]
    NotEmpty,

    #[error("inconsistent layout: {0}")]
    Inconsistent(String),
}
