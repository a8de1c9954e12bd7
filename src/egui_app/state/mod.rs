//! Central application state shared across egui views.
//!
//! Owns the session context, the API client acting for the current session,
//! the feed transport and one controller per screen. Views call into it; it
//! never calls into egui.

use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Instant;

use crate::egui_app::api::{ApiClient, ApiError};
use crate::egui_app::config::Config;
use crate::egui_app::feed::{CableTransport, FeedScreen, FeedTransport};
use crate::egui_app::notice::{Notices, NOTICE_TTL};
use crate::egui_app::screens::{BarsScreen, BeersScreen, EventScreen, UsersScreen, WriteOutcome};
use crate::egui_app::session::{Session, SessionChange, SessionContext, SessionStore};
use crate::egui_app::tasks::{take_ready, Pending, Scope};
use crate::egui_app::types::AppView;
use crate::shared::models::{BarEvent, LoginResponse};

pub struct AppState {
    pub config: Config,
    pub session: SessionContext,
    session_changes: Receiver<SessionChange>,
    api: ApiClient,
    transport: Arc<dyn FeedTransport>,
    current_view: AppView,

    pub feed: FeedScreen,
    pub bars: BarsScreen,
    pub beers: BeersScreen,
    pub event: EventScreen,
    pub users: UsersScreen,
    pub notices: Notices,

    pub email_input: String,
    pub password_input: String,
    pub login_error: Option<String>,
    login_scope: Scope,
    pending_login: Option<Pending<Result<LoginResponse, ApiError>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, Arc::new(CableTransport::new()))
    }

    /// Build with a custom feed transport
    pub fn with_transport(config: Config, transport: Arc<dyn FeedTransport>) -> Self {
        let session = SessionContext::restore(SessionStore::new(config.session_file()));
        let session_changes = session.subscribe();
        let api = ApiClient::new(config.clone()).with_session(session.current().as_ref());
        let logged_in = session.is_logged_in();

        let mut state = Self {
            feed: FeedScreen::new(config.feed_ordering()),
            config,
            session,
            session_changes,
            api,
            transport,
            current_view: AppView::Auth,
            bars: BarsScreen::new(),
            beers: BeersScreen::new(),
            event: EventScreen::new(),
            users: UsersScreen::new(),
            notices: Notices::new(),
            email_input: String::new(),
            password_input: String::new(),
            login_error: None,
            login_scope: Scope::new(),
            pending_login: None,
        };
        state.navigate(if logged_in { AppView::Feed } else { AppView::Auth });
        state
    }

    pub fn current_view(&self) -> AppView {
        self.current_view
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Switch screens, releasing what the old one held and loading the new one
    pub fn navigate(&mut self, view: AppView) {
        let previous = self.current_view;
        if previous != view {
            match previous {
                AppView::Feed => self.feed.unmount(),
                AppView::Bars | AppView::Map if !matches!(view, AppView::Bars | AppView::Map | AppView::Event) => {
                    self.bars.unmount()
                }
                AppView::Beers => self.beers.unmount(),
                AppView::Event => self.event.unmount(),
                AppView::Users => self.users.unmount(),
                _ => {}
            }
            tracing::debug!("Navigating {:?} -> {:?}", previous, view);
        }
        self.current_view = view;

        match view {
            AppView::Feed => {
                let session = self.session.current();
                self.feed.mount(&self.api, session.as_ref(), &*self.transport);
            }
            AppView::Bars | AppView::Map => self.bars.load(&self.api),
            AppView::Beers => self.beers.load(&self.api),
            AppView::Users => self.users.load(&self.api),
            AppView::Auth | AppView::Event => {}
        }
    }

    pub fn open_event(&mut self, event: BarEvent) {
        self.event.open(&self.api, event);
        self.navigate(AppView::Event);
    }

    /// React to the result of a write request
    pub fn handle_outcome(&mut self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Started | WriteOutcome::Busy => {}
            WriteOutcome::LoginRequired => {
                self.notices.info("Log in to do that");
                self.navigate(AppView::Auth);
            }
            WriteOutcome::Invalid(reason) => self.notices.error(reason),
        }
    }

    pub fn handle_login(&mut self) {
        if self.pending_login.is_some() {
            return;
        }
        let email = self.email_input.trim().to_string();
        if email.is_empty() || self.password_input.is_empty() {
            self.login_error = Some("Email and password are required".to_string());
            return;
        }

        self.login_error = None;
        let api = self.api.clone();
        let password = self.password_input.clone();
        self.pending_login = Some(self.login_scope.spawn(async move { api.login(&email, &password).await }));
    }

    pub fn is_logging_in(&self) -> bool {
        self.pending_login.is_some()
    }

    pub fn logout(&mut self) {
        self.feed.unmount();
        if let Err(e) = self.session.logout() {
            self.notices.error(format!("Could not clear the saved session: {}", e));
        }
    }

    /// Everything that must happen once per frame before rendering
    pub fn update(&mut self) {
        self.check_login_result();
        self.apply_session_changes();

        self.feed.poll();
        self.bars.poll();
        self.beers.poll(&mut self.notices);
        self.event.poll(&mut self.notices);
        self.users.poll(&mut self.notices);
        self.notices.expire(Instant::now(), NOTICE_TTL);
    }

    fn check_login_result(&mut self) {
        let Some(result) = take_ready(&mut self.pending_login) else {
            return;
        };
        match result {
            Ok(response) => {
                let session = Session {
                    token: response.token,
                    user_id: response.user_id,
                    handle: response.handle,
                };
                match self.session.login(session) {
                    Ok(()) => self.password_input.clear(),
                    Err(e) => self.login_error = Some(format!("Could not save session: {}", e)),
                }
            }
            Err(ApiError::Status { status: 401, .. }) => {
                self.login_error = Some("Invalid email or password".to_string());
            }
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                self.login_error = Some(e.user_message());
            }
        }
    }

    fn apply_session_changes(&mut self) {
        while let Ok(change) = self.session_changes.try_recv() {
            self.reset_screens();
            match change {
                SessionChange::LoggedIn(session) => {
                    self.api = self.api.with_session(Some(&session));
                    self.navigate(AppView::Feed);
                }
                SessionChange::LoggedOut => {
                    self.api = self.api.with_session(None);
                    self.navigate(AppView::Auth);
                }
            }
        }
    }

    /// Throw away everything fetched for the previous session; friendship
    /// flags and attendance are per user, so nothing is reusable.
    fn reset_screens(&mut self) {
        self.feed.unmount();
        self.bars.unmount();
        self.beers.unmount();
        self.event.unmount();
        self.users.unmount();
        self.bars = BarsScreen::new();
        self.beers = BeersScreen::new();
        self.event = EventScreen::new();
        self.users = UsersScreen::new();
    }
}
