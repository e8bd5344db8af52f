//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# OneAI Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[window]
# title = "OneAI"
# width = 1400           # 400-7680
# height = 900           # 300-4320

[layout]
# panel_gap = 4          # 0-20
# outer_padding = 0      # 0-40

[automation]
# selector_timeout_ms = 5000     # 100-60000
# poll_interval_ms = 100         # 10-5000
# reply_timeout_ms = 2000        # 100-30000
# broadcast_ceiling_ms = 15000   # 1000-300000

# Recipes replace the built-in entry with the same app_id, or add a new one.
# [[automation.recipes]]
# app_id = "claude"
# input_selectors = ["div[contenteditable=\"true\"]", "textarea"]
# submit_method = "enter"        # "enter" or "click"
# submit_selector = "button[aria-label*=\"Send\"]"

[persistence]
# storage_path = "/path/to/storage.json"
# autosave_secs = 30             # 0 disables, max 3600

[logging]
# level = "INFO"                 # DEBUG, INFO, WARNING, ERROR

# Extra applications for the catalog.
# [[apps]]
# id = "claude"
# display_name = "Claude"
# url = "https://claude.ai/new"
# bordered = true
"##
    .to_string()
}
