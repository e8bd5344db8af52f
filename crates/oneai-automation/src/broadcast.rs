//! Fan one message out to many surfaces concurrently.

use std::sync::Arc;
use std::time::Duration;

use oneai_config::AutomationConfig;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tracing::{info, warn};

use crate::dispatcher::{DispatchPolicy, Dispatcher};
use crate::outcome::{DispatchOutcome, DispatchStatus};
use crate::resolver::RecipeBook;
use crate::surface::Surface;
use crate::AutomationError;

/// One requested broadcast recipient.
#[derive(Clone)]
pub struct BroadcastTarget {
    pub tab_id: String,
    pub app_id: String,
    /// `None` when the tab has no live surface (detached or not created).
    pub surface: Option<Arc<dyn Surface>>,
}

impl std::fmt::Debug for BroadcastTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastTarget")
            .field("tab_id", &self.tab_id)
            .field("app_id", &self.app_id)
            .field("live", &self.surface.is_some())
            .finish()
    }
}

enum Pending {
    Done(DispatchOutcome),
    Running(String, JoinHandle<DispatchOutcome>),
}

/// Runs one dispatch task per target under a single overall deadline.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    dispatcher: Arc<Dispatcher>,
    recipes: Arc<RecipeBook>,
    ceiling: Duration,
}

impl Broadcaster {
    pub fn new(dispatcher: Dispatcher, recipes: RecipeBook, ceiling: Duration) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            recipes: Arc::new(recipes),
            ceiling,
        }
    }

    pub fn from_config(config: &AutomationConfig) -> Result<Self, AutomationError> {
        Ok(Self::new(
            Dispatcher::new(DispatchPolicy::from_config(config)),
            RecipeBook::from_config(config)?,
            Duration::from_millis(config.broadcast_ceiling_ms),
        ))
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    /// Dispatch `text` to every target and return one outcome per target, in
    /// input order.
    ///
    /// Targets run as independent tasks. Outcomes still pending when the
    /// ceiling passes are reported as timed out; their tasks keep running
    /// and their results are discarded.
    pub async fn broadcast(&self, text: &str, targets: Vec<BroadcastTarget>) -> Vec<DispatchOutcome> {
        let deadline = Instant::now() + self.ceiling;
        let text: Arc<str> = Arc::from(text);

        let pending: Vec<Pending> = targets
            .into_iter()
            .map(|target| match target.surface {
                None => Pending::Done(DispatchOutcome::failed(
                    target.tab_id,
                    DispatchStatus::TimedOut,
                    "no live surface",
                )),
                Some(surface) => {
                    let dispatcher = Arc::clone(&self.dispatcher);
                    let recipe = self.recipes.resolve(&target.app_id).clone();
                    let text = Arc::clone(&text);
                    let tab_id = target.tab_id.clone();
                    let handle = tokio::spawn(async move {
                        dispatcher
                            .dispatch(&tab_id, surface.as_ref(), &recipe, &text)
                            .await
                    });
                    Pending::Running(target.tab_id, handle)
                }
            })
            .collect();

        let mut outcomes = Vec::with_capacity(pending.len());
        for entry in pending {
            let outcome = match entry {
                Pending::Done(outcome) => outcome,
                Pending::Running(tab_id, handle) => match timeout_at(deadline, handle).await {
                    Ok(Ok(outcome)) => outcome,
                    Ok(Err(e)) => {
                        warn!(%tab_id, error = %e, "Dispatch task failed");
                        DispatchOutcome::failed(
                            tab_id,
                            DispatchStatus::InjectionFailed,
                            format!("dispatch task failed: {e}"),
                        )
                    }
                    Err(_) => DispatchOutcome::failed(
                        tab_id,
                        DispatchStatus::TimedOut,
                        "broadcast deadline reached",
                    ),
                },
            };
            outcomes.push(outcome);
        }

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(targets = outcomes.len(), succeeded, "Broadcast finished");
        outcomes
    }
}
