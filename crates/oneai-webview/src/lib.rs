//! WebView hosting for OneAI panes.
//!
//! Wraps `wry` to provide:
//! - One child webview per visible tab, tracked by tab id
//! - An injected automation script (`window.__oneai`) and the
//!   request/reply bridge that drives it from async code
//! - [`WebViewSurface`], the `Surface` the automation dispatcher talks to
//! - Navigation guarding and page-load readiness tracking

pub mod bridge;
pub mod events;
pub mod ipc;
pub mod manager;
pub mod scripts;
pub mod surface;

pub use bridge::{ScriptBridge, ScriptRequest};
pub use events::{PageLoadState, WebViewEvent};
pub use ipc::{AutomationReply, IpcMessage};
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager, WebViewRegistry};
pub use surface::WebViewSurface;
