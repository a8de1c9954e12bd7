//! Per-section load state and its reducer
//!
//! Every screen section that fetches data is a `LoadState<T>` driven only
//! through [`reduce`], so the same transitions hold for every screen and none
//! of it depends on egui.

/// Lifecycle of one fetched section
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Errored(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

/// Inputs to [`reduce`]
#[derive(Debug, Clone, PartialEq)]
pub enum LoadAction<T> {
    Start,
    Succeed(T),
    Fail(String),
    Reset,
}

/// The only way a `LoadState` changes.
///
/// `Succeed` and `Fail` are honoured only while `Loading`; a completion that
/// arrives in any other state belongs to a request nobody is waiting for.
pub fn reduce<T>(state: LoadState<T>, action: LoadAction<T>) -> LoadState<T> {
    match (state, action) {
        (_, LoadAction::Reset) => LoadState::Idle,
        (_, LoadAction::Start) => LoadState::Loading,
        (LoadState::Loading, LoadAction::Succeed(data)) => LoadState::Loaded(data),
        (LoadState::Loading, LoadAction::Fail(reason)) => LoadState::Errored(reason),
        (state, LoadAction::Succeed(_)) | (state, LoadAction::Fail(_)) => {
            tracing::debug!("Ignoring completion outside of Loading");
            state
        }
    }
}

impl<T> LoadState<T> {
    pub fn dispatch(&mut self, action: LoadAction<T>) {
        let current = std::mem::take(self);
        *self = reduce(current, action);
    }

    /// Fold a request result in, logging failures the way read sections do
    pub fn finish<E: std::fmt::Display>(&mut self, what: &str, result: Result<T, E>) {
        match result {
            Ok(data) => self.dispatch(LoadAction::Succeed(data)),
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", what, e);
                self.dispatch(LoadAction::Fail(e.to_string()));
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Errored(reason) => Some(reason),
            _ => None,
        }
    }
}
