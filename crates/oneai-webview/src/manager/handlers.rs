use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::bridge::ScriptBridge;
use crate::events::{PageLoadState, WebViewEvent};
use crate::ipc::IpcMessage;

use super::{push, WebViewManager};

// =============================================================================
// NAVIGATION GUARD
// =============================================================================

/// Hosted apps may navigate anywhere on the web, but never to local files,
/// `javascript:`/`data:` URLs or other schemes.
pub fn is_navigation_allowed(url: &str) -> bool {
    let url = url.trim_start();
    url.starts_with("https://") || url.starts_with("http://") || url == "about:blank"
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

impl WebViewManager {
    /// Automation replies complete their bridge call directly; anything
    /// else becomes an event.
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        bridge: ScriptBridge,
        tab_id: String,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body();
            let Some(message) = IpcMessage::from_json(body) else {
                warn!(tab_id = %tab_id, body_len = body.len(), "IPC message rejected: invalid JSON");
                return;
            };

            if let Some(reply) = message.automation_reply() {
                bridge.resolve(&tab_id, reply);
                return;
            }

            debug!(tab_id = %tab_id, kind = %message.kind, "IPC message from page");
            push(
                &events,
                WebViewEvent::IpcMessage {
                    tab_id: tab_id.clone(),
                    body: body.clone(),
                },
            );
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        ready: Arc<AtomicBool>,
        tab_id: String,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            ready.store(state == PageLoadState::Finished, Ordering::Release);
            debug!(tab_id = %tab_id, ?state, url = %url, "page load");
            push(
                &events,
                WebViewEvent::PageLoad {
                    tab_id: tab_id.clone(),
                    state,
                    url,
                },
            );
        })
    }

    pub(super) fn attach_title_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        tab_id: String,
    ) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            debug!(tab_id = %tab_id, title = %title, "title changed");
            push(
                &events,
                WebViewEvent::TitleChanged {
                    tab_id: tab_id.clone(),
                    title,
                },
            );
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        tab_id: String,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if is_navigation_allowed(&url) {
                return true;
            }
            warn!(tab_id = %tab_id, url = %url, "navigation blocked");
            push(
                &events,
                WebViewEvent::NavigationBlocked {
                    tab_id: tab_id.clone(),
                    url,
                },
            );
            false
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
