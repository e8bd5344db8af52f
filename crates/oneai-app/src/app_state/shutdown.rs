//! Graceful shutdown: save the workspace, destroy webviews, stop the
//! automation runtime.

use std::time::Duration;

use super::core::OneAiApp;

impl OneAiApp {
    /// Perform graceful shutdown. Safe to call more than once.
    ///
    /// Order matters:
    /// 1. Save the workspace
    /// 2. Destroy webviews (pending script calls fail as detached)
    /// 3. Shut down the automation runtime
    pub(super) fn shutdown(&mut self) {
        let Some(rt) = self.tokio_runtime.take() else {
            return;
        };
        tracing::info!("Initiating graceful shutdown");

        self.save_workspace();

        if let Some(ref mut registry) = self.webviews {
            registry.destroy_all();
        }
        self.webviews = None;
        self.console_rx = None;

        rt.shutdown_timeout(Duration::from_secs(2));

        self.window = None;
        tracing::info!("Graceful shutdown complete");
    }
}
