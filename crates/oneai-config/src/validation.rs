//! Full configuration validation.
//!
//! Validates numeric ranges, recipe shape, and catalog entries. Each domain
//! has its own submodule; this orchestrator calls them all and collects
//! errors into a single `ConfigError`.

mod automation;
mod helpers;
mod misc;

#[cfg(test)]
mod tests;

use crate::schema::OneAiConfig;
use oneai_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &OneAiConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    misc::validate_window(&mut errors, config);
    misc::validate_layout(&mut errors, config);
    misc::validate_persistence(&mut errors, config);
    misc::validate_apps(&mut errors, config);
    automation::validate_timing(&mut errors, config);
    automation::validate_recipes(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
