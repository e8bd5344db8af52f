//! OneAI configuration system.
//!
//! Provides TOML-based configuration, the static application catalog and
//! the built-in automation recipe table. All config sections use sensible
//! defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use oneai_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod catalog;
pub mod schema;
pub mod toml_loader;
pub mod validation;

// Re-export core types for convenience
pub use catalog::{AppCatalog, AppDescriptor};
pub use schema::{
    AutomationConfig, AutomationRecipe, OneAiConfig, SubmitMethod, CONFIG_SCHEMA_VERSION,
    DEFAULT_RECIPE_ID,
};

use std::path::Path;

use oneai_common::ConfigError;

/// Load config from `path` if given, otherwise from the platform default path.
///
/// The default path is created with a commented template on first run.
/// Validation failures are fatal here; callers usually fall back to
/// `OneAiConfig::default()`.
pub fn load_config(path: Option<&Path>) -> Result<OneAiConfig, ConfigError> {
    let config = match path {
        Some(p) => toml_loader::load_from_path(p)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &OneAiConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
