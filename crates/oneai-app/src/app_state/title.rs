//! Window title: the configured title plus the active tab.

use super::core::OneAiApp;

impl OneAiApp {
    pub(super) fn window_title(&self) -> String {
        let base = &self.config.window.title;
        match self.workspace.active_tab() {
            Some(tab) => format!("{base} | {}", tab.title),
            None => base.clone(),
        }
    }

    pub(super) fn update_window_title(&self) {
        if let Some(window) = &self.window {
            window.set_title(&self.window_title());
        }
    }
}
