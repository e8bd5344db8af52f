//! Locate an application's input control, inject text, and submit.

use std::time::Duration;

use oneai_config::{AutomationConfig, AutomationRecipe, SubmitMethod};
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

use crate::outcome::{DispatchOutcome, DispatchStatus};
use crate::surface::{ElementRef, Surface, SurfaceError};

/// Timing for selector polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// Bounded wait for any selector in a list to resolve.
    pub selector_timeout: Duration,
    /// Delay between polling rounds.
    pub poll_interval: Duration,
}

impl DispatchPolicy {
    pub fn from_config(config: &AutomationConfig) -> Self {
        Self {
            selector_timeout: Duration::from_millis(config.selector_timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self::from_config(&AutomationConfig::default())
    }
}

/// A selector that resolved, with the element it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub selector: String,
    pub element: ElementRef,
}

#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    policy: DispatchPolicy,
}

impl Dispatcher {
    pub fn new(policy: DispatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Poll `selectors` in order, round after round, until one resolves to a
    /// visible, enabled element or the selector timeout passes.
    ///
    /// `Ok(None)` on timeout. Invalid selectors and failed queries count as
    /// "did not resolve"; only a detached surface aborts the wait.
    pub async fn wait_for_selector(
        &self,
        surface: &dyn Surface,
        selectors: &[String],
    ) -> Result<Option<Resolved>, SurfaceError> {
        let deadline = Instant::now() + self.policy.selector_timeout;
        loop {
            for selector in selectors {
                match surface.query(selector).await {
                    Ok(Some(element)) if element.is_interactable() => {
                        trace!(%selector, handle = %element.handle, "Selector resolved");
                        return Ok(Some(Resolved {
                            selector: selector.clone(),
                            element,
                        }));
                    }
                    Ok(_) => {}
                    Err(SurfaceError::Detached) => return Err(SurfaceError::Detached),
                    Err(e) => trace!(%selector, error = %e, "Selector query failed"),
                }
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            sleep(self.policy.poll_interval.min(deadline - now)).await;
        }
    }

    /// Fill in and submit `text` on one surface. Every failure is folded into
    /// the returned outcome.
    pub async fn dispatch(
        &self,
        tab_id: &str,
        surface: &dyn Surface,
        recipe: &AutomationRecipe,
        text: &str,
    ) -> DispatchOutcome {
        if !surface.is_ready() {
            return DispatchOutcome::failed(tab_id, DispatchStatus::TimedOut, "surface not ready");
        }

        let input = match self.wait_for_selector(surface, &recipe.input_selectors).await {
            Ok(Some(resolved)) => resolved,
            Ok(None) => {
                return DispatchOutcome::failed(
                    tab_id,
                    DispatchStatus::InputNotFound,
                    format!(
                        "no input matched {:?} within {}ms",
                        recipe.input_selectors,
                        self.policy.selector_timeout.as_millis()
                    ),
                );
            }
            Err(e) => return surface_failure(tab_id, e, DispatchStatus::TimedOut),
        };
        debug!(tab_id, app_id = %recipe.app_id, selector = %input.selector, "Input located");

        if let Err(e) = surface.set_text(&input.element, text).await {
            return surface_failure(tab_id, e, DispatchStatus::InjectionFailed);
        }

        let submitted = match recipe.submit_method {
            SubmitMethod::KeyTrigger => surface.press_enter(&input.element).await,
            SubmitMethod::ClickTrigger => {
                let Some(selector) = &recipe.submit_selector else {
                    return DispatchOutcome::failed(
                        tab_id,
                        DispatchStatus::InputNotFound,
                        "click submission without a submit selector",
                    );
                };
                let button = match self
                    .wait_for_selector(surface, std::slice::from_ref(selector))
                    .await
                {
                    Ok(Some(resolved)) => resolved,
                    Ok(None) => {
                        return DispatchOutcome::failed(
                            tab_id,
                            DispatchStatus::InputNotFound,
                            format!("submit button {selector:?} not found"),
                        );
                    }
                    Err(e) => return surface_failure(tab_id, e, DispatchStatus::TimedOut),
                };
                surface.click(&button.element).await
            }
        };
        if let Err(e) = submitted {
            return surface_failure(tab_id, e, DispatchStatus::InjectionFailed);
        }

        debug!(tab_id, "Message submitted");
        DispatchOutcome::succeeded(tab_id)
    }
}

/// A detached surface is always a timeout; anything else gets `status`.
fn surface_failure(tab_id: &str, error: SurfaceError, status: DispatchStatus) -> DispatchOutcome {
    let status = match error {
        SurfaceError::Detached => DispatchStatus::TimedOut,
        _ => status,
    };
    debug!(tab_id, %status, error = %error, "Dispatch failed");
    DispatchOutcome::failed(tab_id, status, error.to_string())
}
