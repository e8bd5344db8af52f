//! Internal types and constants for the app state module.

use std::time::Duration;

use oneai_automation::DispatchOutcome;

/// How often the main loop polls for events and queued scripts.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// A finished broadcast, sent back to the main thread for reporting.
#[derive(Debug)]
pub(super) struct BroadcastReport {
    pub text: String,
    pub outcomes: Vec<DispatchOutcome>,
}
