//! Screen controllers
//!
//! Each controller owns its screen's local state and talks to the API through
//! background requests tied to its own [`Scope`](crate::egui_app::tasks::Scope).
//! None of them touch egui; the views in `views/` render them and forward
//! user input.
//!
//! Reads fold into a [`LoadState`]; their failures are logged and the section
//! shows its fallback. Writes report through [`Notices`](crate::egui_app::notice::Notices)
//! and commit local state only once the server confirmed them.

pub mod bars;
pub mod beers;
pub mod event;
pub mod users;

pub use bars::BarsScreen;
pub use beers::BeersScreen;
pub use event::EventScreen;
pub use users::UsersScreen;

use crate::egui_app::api::ApiError;
use crate::egui_app::load::LoadState;
use crate::egui_app::tasks::{take_ready, Pending};
use crate::shared::error::SharedError;

/// What happened when a write action was requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The request is on its way; the result arrives as a notice
    Started,
    /// No session; the caller should send the user to the login screen
    LoginRequired,
    /// The draft did not pass validation
    Invalid(String),
    /// The same write is already in flight
    Busy,
}

impl WriteOutcome {
    pub(crate) fn invalid(error: SharedError) -> Self {
        match error {
            SharedError::ValidationError { message, .. } => WriteOutcome::Invalid(message),
            other => WriteOutcome::Invalid(other.to_string()),
        }
    }
}

pub(crate) type Fetch<T> = Option<Pending<Result<T, ApiError>>>;

/// Apply a finished read to its section, if it finished
pub(crate) fn settle<T>(state: &mut LoadState<T>, slot: &mut Fetch<T>, what: &str) {
    if let Some(result) = take_ready(slot) {
        state.finish(what, result);
    }
}

/// Drop a read that was abandoned mid-flight so the next visit starts over
pub(crate) fn abandon<T>(state: &mut LoadState<T>, slot: &mut Fetch<T>) {
    if slot.take().is_some() && state.is_loading() {
        *state = LoadState::Idle;
    }
}
