//! Tests for the full validation pipeline.

use super::*;
use crate::catalog::AppDescriptor;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = OneAiConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_window_too_small() {
    let mut config = OneAiConfig::default();
    config.window.width = 100;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.width"));
}

#[test]
fn catches_panel_gap_too_large() {
    let mut config = OneAiConfig::default();
    config.layout.panel_gap = 25;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("layout.panel_gap"));
}

#[test]
fn catches_poll_interval_above_timeout() {
    let mut config = OneAiConfig::default();
    config.automation.selector_timeout_ms = 200;
    config.automation.poll_interval_ms = 500;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("exceeds selector_timeout_ms"));
}

#[test]
fn catches_broadcast_ceiling_out_of_range() {
    let mut config = OneAiConfig::default();
    config.automation.broadcast_ceiling_ms = 10;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("automation.broadcast_ceiling_ms"));
}

#[test]
fn catches_recipe_without_selectors() {
    let mut config = OneAiConfig::default();
    config.automation.recipes.push(AutomationRecipe::new("poe", &[]));
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("automation.recipes[0].input_selectors"));
}

#[test]
fn catches_click_recipe_without_submit_selector() {
    let mut config = OneAiConfig::default();
    config.automation.recipes.push(
        AutomationRecipe::new("poe", &["textarea"]).with_submit_method(SubmitMethod::ClickTrigger),
    );
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("no submit_selector"));
}

#[test]
fn catches_duplicate_and_non_http_apps() {
    let mut config = OneAiConfig::default();
    let app = AppDescriptor {
        id: "claude".into(),
        display_name: "Claude".into(),
        url: "file:///tmp/claude.html".into(),
        logo: String::new(),
        bordered: false,
    };
    config.apps.push(app.clone());
    config.apps.push(app);
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("is duplicated"));
    assert!(err.contains("must be http(s)"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = OneAiConfig::default();
    config.window.height = 10;
    config.persistence.autosave_secs = 99_999;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.height"));
    assert!(err.contains("persistence.autosave_secs"));
}
