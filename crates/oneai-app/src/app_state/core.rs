//! OneAiApp struct definition and constructor.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use winit::window::Window;

use oneai_automation::Broadcaster;
use oneai_common::OneAiError;
use oneai_config::{AppCatalog, OneAiConfig};
use oneai_tiling::{persistence, KeyValueStore, LayoutEngine, Workspace};
use oneai_webview::WebViewRegistry;

use super::types::BroadcastReport;

/// Top-level application state.
pub struct OneAiApp {
    pub(super) config: OneAiConfig,
    pub(super) catalog: AppCatalog,

    // Workspace model and its storage
    pub(super) workspace: Workspace,
    pub(super) store: Box<dyn KeyValueStore>,
    pub(super) layout_engine: LayoutEngine,
    /// Set when the workspace changed since the last save.
    pub(super) dirty: bool,
    pub(super) last_save: Instant,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) webviews: Option<WebViewRegistry>,

    // Automation
    pub(super) broadcaster: Broadcaster,
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,
    pub(super) broadcast_tx: mpsc::Sender<BroadcastReport>,
    pub(super) broadcast_rx: mpsc::Receiver<BroadcastReport>,

    // Console lines from stdin
    pub(super) console_rx: Option<mpsc::Receiver<String>>,

    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl OneAiApp {
    /// Build the app around `store`. With `reset`, any saved workspace is
    /// discarded and the default layout is used.
    pub fn new(
        config: OneAiConfig,
        store: Box<dyn KeyValueStore>,
        reset: bool,
    ) -> Result<Self, OneAiError> {
        let catalog = AppCatalog::with_overrides(&config.apps);
        let broadcaster = Broadcaster::from_config(&config.automation)
            .map_err(|e| OneAiError::Automation(e.to_string()))?;

        let workspace = if reset {
            if let Err(e) = persistence::clear(store.as_ref()) {
                tracing::warn!("Failed to clear saved workspace: {e}");
            }
            tracing::info!("Starting from the default workspace");
            Workspace::builtin_default()
        } else {
            persistence::load(store.as_ref())
        };

        let tokio_runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("oneai-automation")
            .enable_all()
            .build()?;

        let (broadcast_tx, broadcast_rx) = mpsc::channel();

        Ok(Self {
            layout_engine: LayoutEngine::from_config(&config.layout),
            config,
            catalog,
            workspace,
            store,
            dirty: reset,
            last_save: Instant::now(),
            window: None,
            webviews: None,
            broadcaster,
            tokio_runtime: Some(tokio_runtime),
            broadcast_tx,
            broadcast_rx,
            console_rx: None,
            should_exit: false,
            last_poll: Instant::now(),
        })
    }

    pub fn attach_console(&mut self, lines: mpsc::Receiver<String>) {
        self.console_rx = Some(lines);
    }
}
