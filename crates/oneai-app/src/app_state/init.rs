//! Window creation and webview setup.

use std::sync::Arc;
use std::time::Duration;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use oneai_webview::{WebViewManager, WebViewRegistry};

use super::core::OneAiApp;

impl OneAiApp {
    /// Create the window and the webview registry.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(self.window_title())
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(self.config.window.width),
                f64::from(self.config.window.height),
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let reply_timeout = Duration::from_millis(self.config.automation.reply_timeout_ms);
        self.webviews = Some(WebViewRegistry::new(WebViewManager::new(reply_timeout)));
        self.window = Some(window);
        tracing::info!(
            width = self.config.window.width,
            height = self.config.window.height,
            "Window created"
        );
        true
    }
}
