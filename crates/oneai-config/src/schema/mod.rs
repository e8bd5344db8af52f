//! Configuration schema types for OneAI.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the built-in defaults.

mod automation;
mod layout;
mod persistence;
mod system;
mod window;

pub use automation::*;
pub use layout::*;
pub use persistence::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

use crate::catalog::AppDescriptor;

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for OneAI.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OneAiConfig {
    pub window: WindowConfig,
    pub layout: LayoutConfig,
    pub automation: AutomationConfig,
    pub persistence: PersistenceConfig,
    pub logging: LoggingConfig,
    /// Extra catalog entries. Entries whose id matches a built-in app
    /// replace it; new ids are appended after the built-ins.
    pub apps: Vec<AppDescriptor>,
}
