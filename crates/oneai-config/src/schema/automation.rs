//! Input automation configuration: timeouts and the recipe table.
//!
//! A recipe tells the dispatcher where a chat application keeps its input
//! control and how a message is submitted. Recipes are pure data, so adding
//! support for a new application is a config change.

use serde::{Deserialize, Serialize};

/// Reserved recipe id used when no application-specific recipe matches.
pub const DEFAULT_RECIPE_ID: &str = "default";

// =============================================================================
// TYPES
// =============================================================================

/// How a recipe submits the injected text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SubmitMethod {
    /// Synthesize an Enter key press on the input element.
    #[default]
    #[serde(rename = "enter", alias = "key")]
    KeyTrigger,
    /// Click the element matched by the recipe's submit selector.
    #[serde(rename = "click")]
    ClickTrigger,
}

/// Automation instructions for one application (or the fallback).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutomationRecipe {
    pub app_id: String,
    /// Candidate input selectors, tried in priority order.
    pub input_selectors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_selector: Option<String>,
    #[serde(default)]
    pub submit_method: SubmitMethod,
}

impl AutomationRecipe {
    pub fn new(app_id: impl Into<String>, input_selectors: &[&str]) -> Self {
        Self {
            app_id: app_id.into(),
            input_selectors: input_selectors.iter().map(|s| s.to_string()).collect(),
            submit_selector: None,
            submit_method: SubmitMethod::KeyTrigger,
        }
    }

    pub fn with_submit_selector(mut self, selector: impl Into<String>) -> Self {
        self.submit_selector = Some(selector.into());
        self
    }

    pub fn with_submit_method(mut self, method: SubmitMethod) -> Self {
        self.submit_method = method;
        self
    }

    pub fn is_default(&self) -> bool {
        self.app_id == DEFAULT_RECIPE_ID
    }
}

/// Automation timing and recipe overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    /// Bounded wait for a selector to resolve (valid range: 100-60000).
    pub selector_timeout_ms: u64,
    /// Delay between selector polling rounds (valid range: 10-5000).
    pub poll_interval_ms: u64,
    /// How long a surface may take to answer one script request
    /// (valid range: 100-30000).
    pub reply_timeout_ms: u64,
    /// Overall deadline for one broadcast (valid range: 1000-300000).
    pub broadcast_ceiling_ms: u64,
    /// Recipes layered over the built-in table. Same-id entries replace
    /// the built-in recipe; unknown ids are appended.
    pub recipes: Vec<AutomationRecipe>,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            selector_timeout_ms: 5000,
            poll_interval_ms: 100,
            reply_timeout_ms: 2000,
            broadcast_ceiling_ms: 15000,
            recipes: Vec::new(),
        }
    }
}

// =============================================================================
// BUILT-IN RECIPES
// =============================================================================

/// The built-in recipe table, in lookup order. Always ends with the
/// `"default"` recipe.
pub fn builtin_recipes() -> Vec<AutomationRecipe> {
    vec![
        // chatgpt.com renders its composer as a contenteditable div.
        AutomationRecipe::new("openai", &["div[contenteditable='true']"]),
        AutomationRecipe::new("claude", &["div[contenteditable=\"true\"]", "textarea"]),
        AutomationRecipe::new("moonshot", &[".chat-input-editor", "div[role=\"textbox\"]"]),
        AutomationRecipe::new(
            "doubao",
            &[
                "textarea.semi-input-textarea",
                "textarea[placeholder*=\"发消息\"]",
            ],
        ),
        AutomationRecipe::new("qianwen", &["textarea", "textarea[placeholder*=\"通义\"]"]),
        AutomationRecipe::new(
            "deepseek",
            &[
                "textarea",
                "textarea[placeholder*=\"DeepSeek\"]",
                "input[type=\"text\"]",
            ],
        ),
        AutomationRecipe::new(
            "gemini",
            &[
                "div[contenteditable=\"true\"]",
                "div[role=\"textbox\"]",
                "textarea",
            ],
        )
        .with_submit_selector(
            "button[aria-label*=\"Send\"], button[aria-label*=\"发送\"], \
             button[aria-label*=\"提交\"], div[role=\"button\"][aria-label*=\"Send\"]",
        ),
        AutomationRecipe::new("minimax", &["textarea", "textarea[placeholder*=\"MiniMax\"]"]),
        AutomationRecipe::new(
            "stepfun",
            &[
                "textarea.Publisher_textarea__pMX9t:not([disabled])",
                "textarea[placeholder*=\"可以问我\"]",
            ],
        )
        .with_submit_selector(
            "button.w-8.h-8.rounded-lg:has(svg.custom-icon-send-outline), \
             button.w-8.h-8.rounded-lg.bg-content-primary",
        )
        .with_submit_method(SubmitMethod::ClickTrigger),
        AutomationRecipe::new(
            DEFAULT_RECIPE_ID,
            &["textarea", "input[type='text']", "div[contenteditable='true']"],
        ),
    ]
}

// =============================================================================
// TESTS
// =============================================================================
