//! Pane layout configuration types.

use serde::{Deserialize, Serialize};

/// Pane layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between panes in pixels (valid range: 0-20).
    pub panel_gap: u32,
    /// Screen-edge padding in pixels (valid range: 0-40).
    pub outer_padding: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            panel_gap: 4,
            outer_padding: 0,
        }
    }
}
