//! The embedded document a dispatcher drives.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How text has to be injected into a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// `<textarea>` or `<input>`: value assignment plus input/change events.
    NativeField,
    /// `contenteditable` or `role="textbox"`: synthetic text insertion.
    RichText,
}

/// A resolved element, addressed by an opaque surface-specific handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRef {
    pub handle: String,
    pub kind: ControlKind,
    pub visible: bool,
    pub enabled: bool,
}

impl ElementRef {
    pub fn is_interactable(&self) -> bool {
        self.visible && self.enabled
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("invalid selector {0}")]
    InvalidSelector(String),

    #[error("element {0} is no longer attached")]
    Stale(String),

    #[error("surface detached")]
    Detached,

    #[error("surface did not reply in time")]
    NoReply,

    #[error("script error: {0}")]
    Script(String),
}

#[async_trait]
pub trait Surface: Send + Sync {
    /// Whether the document has finished loading and can be queried.
    fn is_ready(&self) -> bool;

    /// Resolve `selector` to its first match. An unparseable selector is
    /// `Err(InvalidSelector)`; no match is `Ok(None)`.
    async fn query(&self, selector: &str) -> Result<Option<ElementRef>, SurfaceError>;

    async fn set_text(&self, element: &ElementRef, text: &str) -> Result<(), SurfaceError>;

    async fn press_enter(&self, element: &ElementRef) -> Result<(), SurfaceError>;

    async fn click(&self, element: &ElementRef) -> Result<(), SurfaceError>;
}
