//! Automation validation: polling timings and recipe shape.

use crate::schema::{OneAiConfig, SubmitMethod};

use super::helpers::validate_range;

pub(crate) fn validate_timing(errors: &mut Vec<String>, config: &OneAiConfig) {
    let automation = &config.automation;
    validate_range(
        errors,
        "automation.selector_timeout_ms",
        automation.selector_timeout_ms,
        100,
        60_000,
    );
    validate_range(
        errors,
        "automation.poll_interval_ms",
        automation.poll_interval_ms,
        10,
        5_000,
    );
    validate_range(
        errors,
        "automation.reply_timeout_ms",
        automation.reply_timeout_ms,
        100,
        30_000,
    );
    validate_range(
        errors,
        "automation.broadcast_ceiling_ms",
        automation.broadcast_ceiling_ms,
        1_000,
        300_000,
    );
    if automation.poll_interval_ms > automation.selector_timeout_ms {
        errors.push(format!(
            "automation.poll_interval_ms ({}) exceeds selector_timeout_ms ({})",
            automation.poll_interval_ms, automation.selector_timeout_ms
        ));
    }
}

/// Each recipe needs an id and at least one non-empty input selector; click
/// recipes also need a submit selector.
pub(crate) fn validate_recipes(errors: &mut Vec<String>, config: &OneAiConfig) {
    for (i, recipe) in config.automation.recipes.iter().enumerate() {
        let name = format!("automation.recipes[{i}]");
        if recipe.app_id.trim().is_empty() {
            errors.push(format!("{name}.app_id must not be empty"));
        }
        if recipe.input_selectors.is_empty() {
            errors.push(format!("{name}.input_selectors must not be empty"));
        }
        if recipe.input_selectors.iter().any(|s| s.trim().is_empty()) {
            errors.push(format!("{name}.input_selectors contains an empty selector"));
        }
        if recipe.submit_method == SubmitMethod::ClickTrigger
            && recipe
                .submit_selector
                .as_deref()
                .map_or(true, |s| s.trim().is_empty())
        {
            errors.push(format!(
                "{name} submits by click but has no submit_selector"
            ));
        }
    }
}
