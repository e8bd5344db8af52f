//! WebView event types.

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoadState {
    Started,
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by a hosted webview, drained by the main loop.
#[derive(Debug, Clone, PartialEq)]
pub enum WebViewEvent {
    PageLoad {
        tab_id: String,
        state: PageLoadState,
        url: String,
    },
    TitleChanged {
        tab_id: String,
        title: String,
    },
    /// A non-automation IPC message from page scripts.
    IpcMessage {
        tab_id: String,
        body: String,
    },
    /// A navigation the guard refused.
    NavigationBlocked {
        tab_id: String,
        url: String,
    },
    Closed {
        tab_id: String,
    },
}

impl WebViewEvent {
    pub fn tab_id(&self) -> &str {
        match self {
            Self::PageLoad { tab_id, .. }
            | Self::TitleChanged { tab_id, .. }
            | Self::IpcMessage { tab_id, .. }
            | Self::NavigationBlocked { tab_id, .. }
            | Self::Closed { tab_id } => tab_id,
        }
    }
}
