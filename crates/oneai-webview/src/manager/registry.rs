use std::collections::HashMap;

use oneai_automation::SurfaceError;
use tracing::{debug, warn};
use wry::raw_window_handle;

use crate::events::{PageLoadState, WebViewEvent};
use crate::surface::WebViewSurface;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

/// Maps tab ids to live webviews and runs queued automation scripts
/// against them. Main thread only.
pub struct WebViewRegistry {
    manager: WebViewManager,
    handles: HashMap<String, WebViewHandle>,
}

impl WebViewRegistry {
    pub fn new(manager: WebViewManager) -> Self {
        Self {
            manager,
            handles: HashMap::new(),
        }
    }

    /// Create and register a webview for `tab_id`, replacing any existing one.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        tab_id: &str,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<(), wry::Error> {
        self.destroy(tab_id);
        let handle = self.manager.create(tab_id, window, bounds, config)?;
        self.handles.insert(tab_id.to_string(), handle);
        Ok(())
    }

    pub fn get(&self, tab_id: &str) -> Option<&WebViewHandle> {
        self.handles.get(tab_id)
    }

    pub fn get_mut(&mut self, tab_id: &str) -> Option<&mut WebViewHandle> {
        self.handles.get_mut(tab_id)
    }

    pub fn contains(&self, tab_id: &str) -> bool {
        self.handles.contains_key(tab_id)
    }

    /// An automation surface for the tab's webview, if it has one.
    pub fn surface(&self, tab_id: &str) -> Option<WebViewSurface> {
        let handle = self.handles.get(tab_id)?;
        Some(WebViewSurface::new(
            tab_id,
            self.manager.bridge.clone(),
            handle.ready_flag(),
            self.manager.reply_timeout(),
        ))
    }

    /// Destroy a tab's webview. Calls still waiting on it fail as detached.
    pub fn destroy(&mut self, tab_id: &str) -> bool {
        if self.handles.remove(tab_id).is_none() {
            return false;
        }
        let failed = self.manager.bridge.detach_tab(tab_id);
        debug!(tab_id, failed, "WebView destroyed");
        self.manager.push_event(WebViewEvent::Closed {
            tab_id: tab_id.to_string(),
        });
        true
    }

    pub fn tab_ids(&self) -> Vec<String> {
        self.handles.keys().cloned().collect()
    }

    /// Destroy all webviews. Used during shutdown.
    pub fn destroy_all(&mut self) {
        for tab_id in self.tab_ids() {
            self.destroy(&tab_id);
        }
    }

    pub fn count(&self) -> usize {
        self.handles.len()
    }

    /// Evaluate every queued automation script. Requests for tabs without
    /// a webview fail as detached. Returns how many requests were handled.
    pub fn pump_scripts(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(request) = self.manager.requests.try_recv() {
            handled += 1;
            let bridge = &self.manager.bridge;
            match self.handles.get(&request.tab_id) {
                Some(handle) => {
                    if let Err(e) = handle.evaluate_script(&request.script) {
                        warn!(tab_id = %request.tab_id, error = %e, "Script evaluation failed");
                        bridge.reject(request.request_id, SurfaceError::Script(e.to_string()));
                    }
                }
                None => {
                    bridge.reject(request.request_id, SurfaceError::Detached);
                }
            }
        }
        handled
    }

    /// Drain pending events, folding title and URL changes into the
    /// matching handles first.
    pub fn drain_events(&mut self) -> Vec<WebViewEvent> {
        let events = self.manager.drain_events();
        for event in &events {
            match event {
                WebViewEvent::TitleChanged { tab_id, title } => {
                    if let Some(handle) = self.handles.get_mut(tab_id) {
                        handle.set_title(title.clone());
                    }
                }
                WebViewEvent::PageLoad {
                    tab_id,
                    state: PageLoadState::Started,
                    url,
                } => {
                    if let Some(handle) = self.handles.get_mut(tab_id) {
                        handle.set_url(url.clone());
                    }
                }
                _ => {}
            }
        }
        events
    }
}
