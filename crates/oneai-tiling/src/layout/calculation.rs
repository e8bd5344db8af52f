//! Layout calculation: recursive tree-to-rect computation.

use oneai_common::Rect;

use crate::tree::{Direction, LayoutNode, LayoutTree, TabId};

use super::LayoutEngine;

impl LayoutEngine {
    /// One `(tab_id, rect)` per leaf, in leaf order. An empty tree yields
    /// nothing.
    pub fn compute(&self, tree: &LayoutTree, viewport: Rect) -> Vec<(TabId, Rect)> {
        let mut results = Vec::new();
        if let Some(root) = tree.root() {
            let bounds = viewport.inset(self.outer_padding as f64);
            self.layout_node(tree, root, bounds, &mut results);
        }
        results
    }

    fn layout_node(&self, tree: &LayoutTree, id: &str, bounds: Rect, out: &mut Vec<(TabId, Rect)>) {
        match tree.node(id) {
            Some(LayoutNode::Leaf { tab_id }) => out.push((tab_id.clone(), bounds)),
            Some(LayoutNode::Split {
                direction,
                children,
                ratios,
            }) => {
                let gap = self.gap as f64;
                let total_gap = gap * children.len().saturating_sub(1) as f64;
                let extent = match direction {
                    Direction::Horizontal => bounds.width,
                    Direction::Vertical => bounds.height,
                };
                let available = (extent - total_gap).max(0.0);

                let mut offset = 0.0;
                for (child, ratio) in children.iter().zip(ratios) {
                    let size = available * ratio;
                    let rect = match direction {
                        Direction::Horizontal => {
                            Rect::new(bounds.x + offset, bounds.y, size, bounds.height)
                        }
                        Direction::Vertical => {
                            Rect::new(bounds.x, bounds.y + offset, bounds.width, size)
                        }
                    };
                    self.layout_node(tree, child, rect, out);
                    offset += size + gap;
                }
            }
            None => {}
        }
    }
}
