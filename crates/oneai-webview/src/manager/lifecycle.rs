use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::debug;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::scripts::AUTOMATION_INIT_SCRIPT;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

impl WebViewManager {
    /// Create a webview for `tab_id` as a child of `window`, positioned at
    /// `bounds`. The page starts out not ready.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        tab_id: &str,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, wry::Error> {
        let ready = Arc::new(AtomicBool::new(false));

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_autoplay(config.autoplay)
            .with_focused(false)
            .with_initialization_script(AUTOMATION_INIT_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = Self::attach_ipc_handler(
            builder,
            Arc::clone(&self.events),
            self.bridge.clone(),
            tab_id.to_string(),
        );
        builder = Self::attach_page_load_handler(
            builder,
            Arc::clone(&self.events),
            Arc::clone(&ready),
            tab_id.to_string(),
        );
        builder = Self::attach_title_handler(builder, Arc::clone(&self.events), tab_id.to_string());
        builder =
            Self::attach_navigation_handler(builder, Arc::clone(&self.events), tab_id.to_string());

        let webview = builder.with_url(&config.url).build_as_child(window)?;

        debug!(tab_id, url = %config.url, "WebView created");

        Ok(WebViewHandle {
            webview,
            tab_id: tab_id.to_string(),
            ready,
            current_url: config.url,
            current_title: String::new(),
        })
    }
}
