//! The workspace: layout tree, tab registry, and active tab as one value.

mod focus;
mod operations;
mod seed;
mod types;

pub use seed::DEFAULT_ROOT_ID;
pub use types::*;
