//! The built-in workspace shown on first run or when the stored one is unusable.

use std::collections::HashMap;

use crate::tabs::{Tab, TabRegistry};
use crate::tree::{Direction, LayoutNode, LayoutTree, NodeEntry};

use super::Workspace;

pub const DEFAULT_ROOT_ID: &str = "root";

/// `(leaf id, tab id, app id, title, created_at)` for each default pane.
const DEFAULT_PANES: [(&str, &str, &str, &str, u64); 3] = [
    ("pane-1", "deepseek-1763100371335", "deepseek", "DeepSeek", 1763100371335),
    (
        "pane-2",
        "tencent-yuanbao-1763100374334",
        "tencent-yuanbao",
        "Tencent Yuanbao",
        1763100374334,
    ),
    ("pane-3", "moonshot-1763100396085", "moonshot", "Kimi", 1763100396085),
];

impl Workspace {
    /// Three side-by-side panes: DeepSeek, Tencent Yuanbao, Kimi.
    pub fn builtin_default() -> Self {
        let mut nodes = HashMap::new();
        let mut children = Vec::new();
        let mut tabs = Vec::new();
        for (leaf_id, tab_id, app_id, title, created_at) in DEFAULT_PANES {
            children.push(leaf_id.to_string());
            nodes.insert(
                leaf_id.to_string(),
                NodeEntry {
                    node: LayoutNode::Leaf {
                        tab_id: tab_id.to_string(),
                    },
                    parent: Some(DEFAULT_ROOT_ID.to_string()),
                },
            );
            tabs.push(Tab {
                id: tab_id.to_string(),
                app_id: app_id.to_string(),
                title: title.to_string(),
                created_at,
            });
        }
        let share = 1.0 / children.len() as f64;
        nodes.insert(
            DEFAULT_ROOT_ID.to_string(),
            NodeEntry {
                node: LayoutNode::Split {
                    direction: Direction::Horizontal,
                    ratios: vec![share; children.len()],
                    children,
                },
                parent: None,
            },
        );

        let active_tab_id = tabs.first().map(|t| t.id.clone());
        Self {
            layout: LayoutTree {
                nodes,
                root: Some(DEFAULT_ROOT_ID.to_string()),
            },
            tabs: TabRegistry::from_tabs(tabs).unwrap_or_default(),
            active_tab_id,
        }
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::builtin_default()
    }
}
