//! Main-loop polling: console lines, webview events, the automation script
//! queue, broadcast reports and autosave.

use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use winit::event_loop::ActiveEventLoop;

use super::core::OneAiApp;
use super::types::POLL_INTERVAL;

impl OneAiApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_once(now);
        }

        event_loop.set_control_flow(winit::event_loop::ControlFlow::WaitUntil(
            Instant::now() + POLL_INTERVAL,
        ));
    }

    pub(super) fn poll_once(&mut self, now: Instant) {
        self.poll_console();
        self.pump_scripts();
        self.poll_webview_events();
        self.poll_broadcasts();
        self.autosave_if_due(now);
    }

    fn poll_console(&mut self) {
        let mut lines = Vec::new();
        let mut closed = false;
        if let Some(rx) = &self.console_rx {
            loop {
                match rx.try_recv() {
                    Ok(line) => lines.push(line),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        closed = true;
                        break;
                    }
                }
            }
        }
        if closed {
            self.console_rx = None;
        }
        for line in lines {
            self.handle_console_line(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Instant;

    use crate::app_state::core::test_support::app;

    #[test]
    fn console_lines_are_executed_in_order() {
        let mut app = app();
        let (tx, rx) = mpsc::channel();
        app.attach_console(rx);
        tx.send("open grok".to_string()).unwrap();
        tx.send("close".to_string()).unwrap();

        app.poll_once(Instant::now());

        // The grok tab was opened, made active, then closed.
        assert_eq!(app.workspace.tabs().len(), 3);
        assert!(app.workspace.tabs().iter().all(|t| t.app_id != "grok"));
        assert!(app.console_rx.is_some());
    }

    #[test]
    fn closed_console_is_dropped() {
        let mut app = app();
        let (tx, rx) = mpsc::channel::<String>();
        app.attach_console(rx);
        drop(tx);
        app.poll_once(Instant::now());
        assert!(app.console_rx.is_none());
    }

    #[test]
    fn quit_from_console_requests_exit() {
        let mut app = app();
        let (tx, rx) = mpsc::channel();
        app.attach_console(rx);
        tx.send("quit".to_string()).unwrap();
        app.poll_once(Instant::now());
        assert!(app.should_exit);
    }
}
