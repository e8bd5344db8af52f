//! Layout engine configuration.

use oneai_config::schema::LayoutConfig;

/// Computes pane rectangles from the layout tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    /// Gap in logical pixels between sibling panes.
    pub gap: u32,
    /// Padding in logical pixels around the whole pane area.
    pub outer_padding: u32,
}

impl LayoutEngine {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            gap: config.panel_gap,
            outer_padding: config.outer_padding,
        }
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}
