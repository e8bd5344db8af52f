//! WebView lifecycle: create, hide, destroy and position webviews so they
//! match the workspace, and poll their events.

use oneai_common::Rect;
use oneai_webview::{PageLoadState, WebViewConfig, WebViewEvent};

use crate::app_state::core::OneAiApp;

use super::bounds::layout_rect_to_wry;

impl OneAiApp {
    /// The window's content area in logical coordinates. Before the window
    /// exists this is the configured size.
    pub(in crate::app_state) fn viewport(&self) -> Rect {
        match &self.window {
            Some(w) => {
                let size = w.inner_size().to_logical::<f64>(w.scale_factor());
                Rect::new(0.0, 0.0, size.width, size.height)
            }
            None => Rect::new(
                0.0,
                0.0,
                f64::from(self.config.window.width),
                f64::from(self.config.window.height),
            ),
        }
    }

    /// Bring the webviews in line with the workspace: closed tabs lose
    /// their webview, detached tabs are hidden, visible tabs get a webview
    /// at their layout bounds.
    pub(in crate::app_state) fn sync_webviews(&mut self) {
        let Some(window) = self.window.clone() else {
            return;
        };
        let viewport = self.viewport();
        let layout = self.layout_engine.compute(self.workspace.layout(), viewport);
        let Some(registry) = self.webviews.as_mut() else {
            return;
        };

        for tab_id in registry.tab_ids() {
            if !self.workspace.tabs().contains(&tab_id) {
                registry.destroy(&tab_id);
                tracing::info!(tab_id = %tab_id, "WebView destroyed for closed tab");
            } else if !self.workspace.is_placed(&tab_id) {
                if let Some(handle) = registry.get(&tab_id) {
                    if let Err(e) = handle.set_visible(false) {
                        tracing::warn!(tab_id = %tab_id, error = %e, "Failed to hide webview");
                    }
                }
            }
        }

        for (tab_id, rect) in &layout {
            let bounds = layout_rect_to_wry(rect);

            if let Some(handle) = registry.get(tab_id) {
                if let Err(e) = handle.set_bounds(bounds).and_then(|()| handle.set_visible(true)) {
                    tracing::warn!(tab_id = %tab_id, error = %e, "Failed to update webview bounds");
                }
                continue;
            }

            let Some(tab) = self.workspace.tabs().get(tab_id) else {
                continue;
            };
            let Some(app) = self.catalog.get(&tab.app_id) else {
                tracing::warn!(tab_id = %tab_id, app_id = %tab.app_id, "No catalog entry; pane left empty");
                continue;
            };

            let config = WebViewConfig::with_url(&app.url);
            match registry.create(tab_id, window.as_ref(), bounds, config) {
                Ok(()) => tracing::info!(tab_id = %tab_id, url = %app.url, "WebView created for tab"),
                Err(e) => tracing::error!(tab_id = %tab_id, error = %e, "Failed to create webview"),
            }
        }
    }

    /// Reposition existing webviews after a window resize.
    pub(in crate::app_state) fn sync_webview_bounds(&mut self) {
        let viewport = self.viewport();
        let layout = self.layout_engine.compute(self.workspace.layout(), viewport);
        let Some(registry) = &self.webviews else {
            return;
        };
        for (tab_id, rect) in &layout {
            if let Some(handle) = registry.get(tab_id) {
                if let Err(e) = handle.set_bounds(layout_rect_to_wry(rect)) {
                    tracing::warn!(tab_id = %tab_id, error = %e, "Failed to update webview bounds");
                }
            }
        }
    }

    pub(in crate::app_state) fn focus_active_webview(&self) {
        let (Some(registry), Some(tab_id)) = (&self.webviews, self.workspace.active_tab_id()) else {
            return;
        };
        if let Some(handle) = registry.get(tab_id) {
            if let Err(e) = handle.focus() {
                tracing::debug!(tab_id = %tab_id, error = %e, "Failed to focus webview");
            }
        }
    }

    /// Evaluate automation scripts queued by in-flight broadcasts.
    pub(in crate::app_state) fn pump_scripts(&mut self) {
        if let Some(registry) = &mut self.webviews {
            registry.pump_scripts();
        }
    }

    /// Process pending webview events (page loads, titles, blocked navigation).
    pub(in crate::app_state) fn poll_webview_events(&mut self) {
        let events: Vec<WebViewEvent> = match &mut self.webviews {
            Some(registry) => registry.drain_events(),
            None => return,
        };

        for event in events {
            match event {
                WebViewEvent::PageLoad { tab_id, state, url } => {
                    if state == PageLoadState::Finished {
                        tracing::debug!(tab_id = %tab_id, url = %url, "Page ready");
                    }
                }
                WebViewEvent::TitleChanged { tab_id, title } => {
                    tracing::trace!(tab_id = %tab_id, title = %title, "Page title changed");
                }
                WebViewEvent::NavigationBlocked { tab_id, url } => {
                    tracing::info!(tab_id = %tab_id, url = %url, "Blocked navigation");
                }
                WebViewEvent::IpcMessage { tab_id, body } => {
                    tracing::debug!(tab_id = %tab_id, body_len = body.len(), "Unhandled IPC message");
                }
                WebViewEvent::Closed { tab_id } => {
                    tracing::debug!(tab_id = %tab_id, "WebView closed");
                }
            }
        }
    }
}
