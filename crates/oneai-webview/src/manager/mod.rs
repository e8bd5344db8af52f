//! WebView lifecycle management.
//!
//! `WebViewManager` builds `wry` child webviews, one per visible tab, wires
//! their handlers to a shared event sink and the script bridge, and owns
//! the queue of scripts waiting to run on the main thread.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::bridge::{ScriptBridge, ScriptRequest};
use crate::events::WebViewEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod registry;
mod types;

pub use handle::WebViewHandle;
pub use registry::WebViewRegistry;
pub use types::WebViewConfig;

pub struct WebViewManager {
    /// Event sink; handlers push here, the main loop drains.
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
    pub(crate) bridge: ScriptBridge,
    pub(crate) requests: mpsc::UnboundedReceiver<ScriptRequest>,
    reply_timeout: Duration,
}

impl WebViewManager {
    /// `reply_timeout` bounds how long surfaces wait for a page to answer
    /// one script request.
    pub fn new(reply_timeout: Duration) -> Self {
        let (bridge, requests) = ScriptBridge::new();
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            bridge,
            requests,
            reply_timeout,
        }
    }

    pub fn bridge(&self) -> &ScriptBridge {
        &self.bridge
    }

    pub fn reply_timeout(&self) -> Duration {
        self.reply_timeout
    }

    pub(crate) fn push_event(&self, event: WebViewEvent) {
        push(&self.events, event);
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *events)
    }
}

pub(crate) fn push(events: &Mutex<Vec<WebViewEvent>>, event: WebViewEvent) {
    events
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(event);
}
