//! Validation for the window, layout, persistence, and catalog sections.

use std::collections::HashSet;

use crate::schema::OneAiConfig;

use super::helpers::validate_range;

pub(crate) fn validate_window(errors: &mut Vec<String>, config: &OneAiConfig) {
    validate_range(errors, "window.width", config.window.width.into(), 400, 7680);
    validate_range(errors, "window.height", config.window.height.into(), 300, 4320);
}

pub(crate) fn validate_layout(errors: &mut Vec<String>, config: &OneAiConfig) {
    validate_range(errors, "layout.panel_gap", config.layout.panel_gap.into(), 0, 20);
    validate_range(
        errors,
        "layout.outer_padding",
        config.layout.outer_padding.into(),
        0,
        40,
    );
}

pub(crate) fn validate_persistence(errors: &mut Vec<String>, config: &OneAiConfig) {
    validate_range(
        errors,
        "persistence.autosave_secs",
        config.persistence.autosave_secs.into(),
        0,
        3600,
    );
    if let Some(path) = &config.persistence.storage_path {
        if path.trim().is_empty() {
            errors.push("persistence.storage_path must not be empty".into());
        }
    }
}

/// Catalog entries need an id, a unique id, and an http(s) URL.
pub(crate) fn validate_apps(errors: &mut Vec<String>, config: &OneAiConfig) {
    let mut seen = HashSet::new();
    for (i, app) in config.apps.iter().enumerate() {
        if app.id.trim().is_empty() {
            errors.push(format!("apps[{i}].id must not be empty"));
            continue;
        }
        if !seen.insert(app.id.as_str()) {
            errors.push(format!("apps[{i}].id '{}' is duplicated", app.id));
        }
        if !(app.url.starts_with("https://") || app.url.starts_with("http://")) {
            errors.push(format!("apps[{i}].url '{}' must be http(s)", app.url));
        }
    }
}
