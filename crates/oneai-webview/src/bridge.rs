//! Request/reply plumbing between async automation code and the webviews,
//! which only the main thread may touch.
//!
//! A call allocates a request id and a random reply token, parks a
//! `oneshot` sender under the id, and queues the rendered script on an mpsc
//! channel. The main loop evaluates
//! queued scripts; the page's `automation_reply` IPC message completes the
//! parked sender.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use oneai_automation::SurfaceError;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::ipc::AutomationReply;
use crate::scripts::{ScriptCall, INVALID_SELECTOR_PREFIX, STALE_PREFIX};

/// A script waiting to be evaluated in a tab's webview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    pub tab_id: String,
    pub request_id: u64,
    pub token: String,
    pub script: String,
}

type ReplyResult = Result<Value, SurfaceError>;

struct PendingCall {
    tab_id: String,
    token: String,
    reply: oneshot::Sender<ReplyResult>,
}

struct Inner {
    next_id: AtomicU64,
    pending: Mutex<HashMap<u64, PendingCall>>,
    requests: mpsc::UnboundedSender<ScriptRequest>,
}

/// Cloneable handle shared by every surface and the IPC handlers.
#[derive(Clone)]
pub struct ScriptBridge {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ScriptBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptBridge")
            .field("pending", &self.pending_count())
            .finish()
    }
}

impl ScriptBridge {
    /// Create a bridge and the receiving end the main loop drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ScriptRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let bridge = Self {
            inner: Arc::new(Inner {
                next_id: AtomicU64::new(1),
                pending: Mutex::new(HashMap::new()),
                requests: tx,
            }),
        };
        (bridge, rx)
    }

    fn pending(&self) -> MutexGuard<'_, HashMap<u64, PendingCall>> {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `call` in `tab_id`'s page and wait up to `timeout` for its reply.
    pub async fn call(
        &self,
        tab_id: &str,
        call: &ScriptCall,
        timeout: Duration,
    ) -> Result<Value, SurfaceError> {
        let request_id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let token = Uuid::new_v4().simple().to_string();
        let (tx, rx) = oneshot::channel();
        self.pending().insert(
            request_id,
            PendingCall {
                tab_id: tab_id.to_string(),
                token: token.clone(),
                reply: tx,
            },
        );

        let request = ScriptRequest {
            tab_id: tab_id.to_string(),
            request_id,
            script: call.render(request_id, &token),
            token,
        };
        if self.inner.requests.send(request).is_err() {
            self.pending().remove(&request_id);
            return Err(SurfaceError::Detached);
        }

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(SurfaceError::Detached),
            Err(_) => {
                self.pending().remove(&request_id);
                debug!(tab_id, request_id, call = call.name(), "Script reply timed out");
                Err(SurfaceError::NoReply)
            }
        }
    }

    /// Complete a pending call with a reply that arrived from `tab_id`.
    /// Replies for unknown ids, from a different tab than the request went
    /// to, or without the request's token are dropped and leave the call
    /// pending.
    pub fn resolve(&self, tab_id: &str, reply: AutomationReply) -> bool {
        let mut pending = self.pending();
        match pending.get(&reply.request_id) {
            Some(call) if call.tab_id != tab_id => {
                warn!(tab_id, request_id = reply.request_id, "Reply from the wrong tab ignored");
                return false;
            }
            Some(call) if call.token != reply.token => {
                warn!(tab_id, request_id = reply.request_id, "Reply with a bad token ignored");
                return false;
            }
            Some(_) => {}
            None => {
                debug!(tab_id, request_id = reply.request_id, "Late or unknown reply dropped");
                return false;
            }
        }
        let Some(call) = pending.remove(&reply.request_id) else {
            return false;
        };
        drop(pending);

        let result = if reply.ok {
            Ok(reply.value)
        } else {
            Err(reply_error(reply.error))
        };
        // The caller may already have given up.
        let _ = call.reply.send(result);
        true
    }

    /// Fail one pending call, e.g. when its script could not be evaluated.
    pub fn reject(&self, request_id: u64, error: SurfaceError) -> bool {
        match self.pending().remove(&request_id) {
            Some(call) => {
                let _ = call.reply.send(Err(error));
                true
            }
            None => false,
        }
    }

    /// Fail every pending call addressed to `tab_id` with `Detached`.
    /// Returns how many calls were failed.
    pub fn detach_tab(&self, tab_id: &str) -> usize {
        let mut pending = self.pending();
        let ids: Vec<u64> = pending
            .iter()
            .filter(|(_, call)| call.tab_id == tab_id)
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            if let Some(call) = pending.remove(id) {
                let _ = call.reply.send(Err(SurfaceError::Detached));
            }
        }
        ids.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending().len()
    }
}

/// Map a page-side error string to a [`SurfaceError`].
pub fn reply_error(error: Option<String>) -> SurfaceError {
    let Some(message) = error else {
        return SurfaceError::Script("unspecified script error".into());
    };
    if let Some(selector) = message.strip_prefix(INVALID_SELECTOR_PREFIX) {
        SurfaceError::InvalidSelector(selector.to_string())
    } else if let Some(handle) = message.strip_prefix(STALE_PREFIX) {
        SurfaceError::Stale(handle.to_string())
    } else {
        SurfaceError::Script(message)
    }
}
