//! IPC envelope between page scripts and Rust.
//!
//! - **JS -> Rust**: `window.ipc.postMessage(JSON.stringify({kind, payload}))`
//!   reaches the webview's IPC handler.
//! - **Rust -> JS**: `evaluate_script` runs a generated call into
//!   `window.__oneai` (see [`crate::scripts`]).

use serde::{Deserialize, Serialize};

/// IPC kind carrying the answer to a script request.
pub const AUTOMATION_REPLY_KIND: &str = "automation_reply";

/// A typed IPC message from JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcMessage {
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Payload of an [`AUTOMATION_REPLY_KIND`] message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationReply {
    pub request_id: u64,
    /// Echo of the token the request was rendered with.
    #[serde(default)]
    pub token: String,
    pub ok: bool,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub error: Option<String>,
}

impl IpcMessage {
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// The reply carried by this message, if it is a well-formed
    /// automation reply.
    pub fn automation_reply(&self) -> Option<AutomationReply> {
        if self.kind != AUTOMATION_REPLY_KIND {
            return None;
        }
        serde_json::from_value(self.payload.clone()).ok()
    }
}
