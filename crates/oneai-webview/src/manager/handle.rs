use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use wry::WebView;

/// One live webview and what we track about it.
pub struct WebViewHandle {
    pub(super) webview: WebView,
    pub(super) tab_id: String,
    /// Set by the page-load handler; shared with this tab's surfaces.
    pub(super) ready: Arc<AtomicBool>,
    pub(super) current_url: String,
    pub(super) current_title: String,
}

impl WebViewHandle {
    pub fn tab_id(&self) -> &str {
        &self.tab_id
    }

    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub(crate) fn ready_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.ready)
    }

    pub fn load_url(&mut self, url: &str) -> Result<(), wry::Error> {
        self.current_url = url.to_string();
        self.webview.load_url(url)
    }

    pub fn reload(&self) -> Result<(), wry::Error> {
        self.webview.reload()
    }

    pub fn evaluate_script(&self, js: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(js)
    }

    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub fn set_visible(&self, visible: bool) -> Result<(), wry::Error> {
        self.webview.set_visible(visible)
    }

    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }

    pub fn set_title(&mut self, title: String) {
        self.current_title = title;
    }

    pub(crate) fn set_url(&mut self, url: String) {
        self.current_url = url;
    }
}
