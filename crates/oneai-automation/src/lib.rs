//! Input automation for hosted chat applications.
//!
//! Resolves a per-application recipe, drives a [`Surface`] to fill in and
//! submit a message, and fans one message out to many surfaces at once.
//! Per-target failures are reported as [`DispatchOutcome`] values, never as
//! errors.

pub mod broadcast;
pub mod dispatcher;
pub mod outcome;
pub mod resolver;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use broadcast::{BroadcastTarget, Broadcaster};
pub use dispatcher::{DispatchPolicy, Dispatcher};
pub use outcome::{DispatchOutcome, DispatchStatus};
pub use resolver::RecipeBook;
pub use surface::{ControlKind, ElementRef, Surface, SurfaceError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AutomationError {
    #[error("recipe table has no \"default\" entry")]
    MissingDefaultRecipe,

    #[error("invalid recipe for {app_id}: {reason}")]
    InvalidRecipe { app_id: String, reason: String },
}
