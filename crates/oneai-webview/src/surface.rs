//! [`Surface`] implementation backed by a hosted webview.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use oneai_automation::{ElementRef, Surface, SurfaceError};
use serde_json::Value;

use crate::bridge::ScriptBridge;
use crate::scripts::ScriptCall;

/// Drives one tab's page through the script bridge.
///
/// Cheap to clone. Readiness is shared with the webview's page-load
/// handler, so a surface handed to a broadcast sees reloads as they happen.
#[derive(Debug, Clone)]
pub struct WebViewSurface {
    tab_id: String,
    bridge: ScriptBridge,
    ready: Arc<AtomicBool>,
    reply_timeout: Duration,
}

impl WebViewSurface {
    pub fn new(
        tab_id: impl Into<String>,
        bridge: ScriptBridge,
        ready: Arc<AtomicBool>,
        reply_timeout: Duration,
    ) -> Self {
        Self {
            tab_id: tab_id.into(),
            bridge,
            ready,
            reply_timeout,
        }
    }

    pub fn tab_id(&self) -> &str {
        &self.tab_id
    }

    async fn call(&self, call: ScriptCall) -> Result<Value, SurfaceError> {
        self.bridge
            .call(&self.tab_id, &call, self.reply_timeout)
            .await
    }
}

#[async_trait]
impl Surface for WebViewSurface {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    async fn query(&self, selector: &str) -> Result<Option<ElementRef>, SurfaceError> {
        let value = self
            .call(ScriptCall::Query {
                selector: selector.to_string(),
            })
            .await?;
        if value.is_null() {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| SurfaceError::Script(format!("malformed query reply: {e}")))
    }

    async fn set_text(&self, element: &ElementRef, text: &str) -> Result<(), SurfaceError> {
        self.call(ScriptCall::SetText {
            handle: element.handle.clone(),
            text: text.to_string(),
        })
        .await
        .map(drop)
    }

    async fn press_enter(&self, element: &ElementRef) -> Result<(), SurfaceError> {
        self.call(ScriptCall::PressEnter {
            handle: element.handle.clone(),
        })
        .await
        .map(drop)
    }

    async fn click(&self, element: &ElementRef) -> Result<(), SurfaceError> {
        self.call(ScriptCall::Click {
            handle: element.handle.clone(),
        })
        .await
        .map(drop)
    }
}
