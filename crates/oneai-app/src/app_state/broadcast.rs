//! `send`: fan a message out to tabs on the automation runtime and report
//! the outcomes back on the main thread.

use std::sync::Arc;

use oneai_automation::{BroadcastTarget, DispatchOutcome, Surface};

use super::core::OneAiApp;
use super::types::BroadcastReport;

impl OneAiApp {
    /// Start a broadcast to `targets` (every visible tab when `None`).
    /// Unknown tab ids are refused before anything is sent; duplicates are
    /// sent once.
    pub(super) fn start_broadcast(
        &mut self,
        targets: Option<Vec<String>>,
        text: String,
    ) -> Result<String, String> {
        if text.trim().is_empty() {
            return Err("nothing to send".into());
        }
        let mut tab_ids = targets.unwrap_or_else(|| self.workspace.visible_tab_ids());
        let mut seen = std::collections::HashSet::new();
        tab_ids.retain(|id| seen.insert(id.clone()));
        if tab_ids.is_empty() {
            return Err("no tabs to send to".into());
        }

        let mut resolved = Vec::with_capacity(tab_ids.len());
        for tab_id in tab_ids {
            let Some(tab) = self.workspace.tabs().get(&tab_id) else {
                return Err(format!("unknown tab: {tab_id}"));
            };
            let surface = self
                .webviews
                .as_ref()
                .and_then(|registry| registry.surface(&tab_id))
                .map(|surface| Arc::new(surface) as Arc<dyn Surface>);
            resolved.push(BroadcastTarget {
                app_id: tab.app_id.clone(),
                tab_id,
                surface,
            });
        }

        let Some(runtime) = &self.tokio_runtime else {
            return Err("automation runtime is shut down".into());
        };
        let count = resolved.len();
        let broadcaster = self.broadcaster.clone();
        let reports = self.broadcast_tx.clone();
        tracing::info!(targets = count, text_len = text.len(), "Broadcast started");
        runtime.spawn(async move {
            let outcomes = broadcaster.broadcast(&text, resolved).await;
            let _ = reports.send(BroadcastReport { text, outcomes });
        });

        Ok(format!("sending to {count} tab(s)..."))
    }

    /// Print finished broadcasts.
    pub(super) fn poll_broadcasts(&mut self) {
        while let Ok(report) = self.broadcast_rx.try_recv() {
            println!("{}", format_report(&report.text, &report.outcomes));
        }
    }
}

fn format_report(text: &str, outcomes: &[DispatchOutcome]) -> String {
    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    let mut lines = vec![format!(
        "sent {text:?}: {succeeded}/{} succeeded",
        outcomes.len()
    )];
    lines.extend(outcomes.iter().map(|o| format!("  {o}")));
    lines.join("\n")
}
