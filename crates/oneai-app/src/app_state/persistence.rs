//! Workspace saving: on demand, on a periodic autosave tick, and at shutdown.

use std::time::{Duration, Instant};

use oneai_tiling::persistence;

use super::core::OneAiApp;

impl OneAiApp {
    /// Save now. Returns whether the store accepted the record.
    pub(super) fn save_workspace(&mut self) -> bool {
        match persistence::try_save(self.store.as_ref(), &self.workspace) {
            Ok(()) => {
                self.dirty = false;
                self.last_save = Instant::now();
                true
            }
            Err(e) => {
                tracing::warn!("Failed to save workspace: {e}");
                false
            }
        }
    }

    /// Save if the workspace changed and the autosave interval has passed.
    /// An interval of zero disables autosave.
    pub(super) fn autosave_if_due(&mut self, now: Instant) {
        let secs = self.config.persistence.autosave_secs;
        if secs == 0 || !self.dirty {
            return;
        }
        if now.duration_since(self.last_save) >= Duration::from_secs(u64::from(secs)) {
            tracing::debug!("Autosaving workspace");
            self.save_workspace();
        }
    }

    pub(super) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use oneai_tiling::persistence;

    use crate::app_state::core::test_support::app;

    #[test]
    fn save_clears_dirty_flag() {
        let mut app = app();
        app.mark_dirty();
        assert!(app.save_workspace());
        assert!(!app.dirty);
        let loaded = persistence::try_load(app.store.as_ref()).unwrap().unwrap();
        assert_eq!(loaded, app.workspace);
    }

    #[test]
    fn autosave_waits_for_the_interval() {
        let mut app = app();
        app.mark_dirty();
        let start = app.last_save;

        app.autosave_if_due(start + Duration::from_secs(5));
        assert!(app.dirty);

        app.autosave_if_due(start + Duration::from_secs(30));
        assert!(!app.dirty);
    }

    #[test]
    fn autosave_skips_clean_workspace() {
        let mut app = app();
        app.autosave_if_due(Instant::now() + Duration::from_secs(3600));
        assert!(persistence::try_load(app.store.as_ref()).unwrap().is_none());
    }

    #[test]
    fn zero_interval_disables_autosave() {
        let mut app = app();
        app.config.persistence.autosave_secs = 0;
        app.mark_dirty();
        app.autosave_if_due(Instant::now() + Duration::from_secs(3600));
        assert!(app.dirty);
    }
}
