//! Workspace model for OneAI: the pane layout tree, the tab registry, the
//! workspace that ties them together, pane geometry, and persistence.

pub mod layout;
pub mod persistence;
pub mod tabs;
pub mod tree;
pub mod workspace;

pub use layout::LayoutEngine;
pub use persistence::{FileStore, KeyValueStore, MemoryStore, PersistenceError};
pub use tabs::{Tab, TabRegistry};
pub use tree::{Direction, LayoutError, LayoutNode, LayoutTree, NodeId, Position, RatioPolicy, TabId};
pub use workspace::{Workspace, WorkspaceError};
