//! Feed screen controller
//!
//! Sequencing on mount:
//!
//! 1. open the feed subscription (single attempt);
//! 2. once the channel reports connected, request page 1 of `GET /feed`;
//! 3. merge pushes as they arrive and the page when it lands;
//! 4. for every event that photo entries point at, fetch its pictures once in
//!    the background and attach them to each photo from that event.
//!
//! If the subscription cannot be opened, or ends before connecting, page 1 is
//! requested anyway so the screen still shows the snapshot.
//!
//! Unmount releases the subscription and invalidates the scope, so nothing
//! in flight can touch the discarded state.

use super::channel::{ChannelEvent, ChannelStatus, FeedSubscription, FeedTransport};
use super::merge::FeedState;
use crate::egui_app::api::{ApiClient, ApiError};
use crate::egui_app::load::{LoadAction, LoadState};
use crate::egui_app::session::Session;
use crate::egui_app::tasks::{take_ready, Pending, Poll, Scope};
use crate::shared::config::FeedOrdering;
use crate::shared::models::{EventPicture, FeedEntry, FeedPage};
use chrono::Utc;
use std::collections::{HashMap, HashSet};

type PageResult = Result<FeedPage, ApiError>;
type PicturesResult = Result<Vec<EventPicture>, ApiError>;

pub struct FeedScreen {
    state: FeedState,
    api: Option<ApiClient>,
    subscription: Option<FeedSubscription>,
    scope: Scope,
    mounted: bool,
    /// Status of the latest page request; `Loaded` carries the pages merged
    pages: LoadState<u32>,
    pages_merged: u32,
    pending_page: Option<Pending<PageResult>>,
    initial_requested: bool,
    exhausted: bool,
    /// In-flight picture fetches by event id
    enrichments: Vec<(i64, Pending<PicturesResult>)>,
    requested_events: HashSet<i64>,
    event_pictures: HashMap<i64, Vec<EventPicture>>,
}

impl FeedScreen {
    pub fn new(ordering: FeedOrdering) -> Self {
        Self {
            state: FeedState::new(ordering),
            api: None,
            subscription: None,
            scope: Scope::new(),
            mounted: false,
            pages: LoadState::Idle,
            pages_merged: 0,
            pending_page: None,
            initial_requested: false,
            exhausted: false,
            enrichments: Vec::new(),
            requested_events: HashSet::new(),
            event_pictures: HashMap::new(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount(&mut self, api: &ApiClient, session: Option<&Session>, transport: &dyn FeedTransport) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.state = FeedState::new(api.config().feed_ordering());
        self.api = Some(api.clone());
        self.pages = LoadState::Idle;
        self.pages_merged = 0;
        self.initial_requested = false;
        self.exhausted = false;

        match FeedSubscription::open(transport, api.config(), session) {
            Ok(subscription) => self.subscription = Some(subscription),
            Err(e) => {
                tracing::info!("Feed channel unavailable ({}); showing snapshot only", e);
                self.request_initial_page();
            }
        }
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        if let Some(mut subscription) = self.subscription.take() {
            subscription.release();
        }
        self.scope.invalidate();
        self.pending_page = None;
        self.enrichments.clear();
        self.requested_events.clear();
        self.event_pictures.clear();
        self.state.clear();
        self.api = None;
    }

    /// Apply everything that happened since the last frame
    pub fn poll(&mut self) {
        if !self.mounted {
            return;
        }

        let events = match self.subscription.as_mut() {
            Some(subscription) => subscription.poll_events(),
            None => Vec::new(),
        };
        for event in events {
            match event {
                ChannelEvent::Connected => {
                    tracing::info!("Feed channel connected");
                    self.request_initial_page();
                }
                ChannelEvent::Push(entry) => {
                    tracing::debug!("Feed push {:?}", entry.key());
                    let event_id = photo_event(&entry);
                    self.state.merge_push(entry, Utc::now());
                    self.enrich(event_id);
                }
                ChannelEvent::Rejected => {
                    tracing::warn!("Feed subscription rejected");
                    self.request_initial_page();
                }
                ChannelEvent::Disconnected(reason) => {
                    tracing::info!("Feed channel closed: {}", reason.as_deref().unwrap_or("by server"));
                    self.request_initial_page();
                }
            }
        }

        if let Some(result) = take_ready(&mut self.pending_page) {
            self.apply_page(result);
        }

        let mut finished = Vec::new();
        self.enrichments.retain(|(event_id, pending)| match pending.poll() {
            Poll::Waiting => true,
            Poll::Ready(result) => {
                finished.push((*event_id, result));
                false
            }
            Poll::Gone => false,
        });
        for (event_id, result) in finished {
            match result {
                Ok(pictures) => {
                    self.state.attach_event_pictures(event_id, &pictures);
                    self.event_pictures.insert(event_id, pictures);
                }
                // Best effort: the entries stay visible without their pictures.
                Err(e) => tracing::warn!("Could not load pictures for event {}: {}", event_id, e),
            }
        }
    }

    /// Fetch the next older page, if any
    pub fn load_more(&mut self) {
        if !self.mounted || !self.initial_requested || self.exhausted || self.pending_page.is_some() {
            return;
        }
        self.request_page();
    }

    fn request_initial_page(&mut self) {
        if self.initial_requested {
            return;
        }
        self.initial_requested = true;
        self.request_page();
    }

    fn request_page(&mut self) {
        let Some(api) = self.api.clone() else {
            return;
        };
        let page = self.pages_merged + 1;
        self.pages.dispatch(LoadAction::Start);
        self.pending_page = Some(self.scope.spawn(async move { api.get_feed_page(page).await }));
    }

    fn apply_page(&mut self, result: PageResult) {
        match result {
            Ok(page) => {
                if page.is_exhausted() {
                    self.exhausted = true;
                } else {
                    self.pages_merged += 1;
                }
                let events: Vec<i64> = page.entries.iter().filter_map(photo_event).collect();
                self.state.merge_page(page.entries);
                for event_id in events {
                    self.enrich(Some(event_id));
                }
                self.pages.dispatch(LoadAction::Succeed(self.pages_merged));
            }
            Err(e) => {
                tracing::warn!("Failed to load feed page {}: {}", self.pages_merged + 1, e);
                self.pages.dispatch(LoadAction::Fail(e.to_string()));
            }
        }
    }

    /// Attach pictures already fetched for `event_id`, or fetch them once
    fn enrich(&mut self, event_id: Option<i64>) {
        let Some(event_id) = event_id else {
            return;
        };
        if let Some(pictures) = self.event_pictures.get(&event_id) {
            self.state.attach_event_pictures(event_id, pictures);
            return;
        }
        let Some(api) = self.api.clone() else {
            return;
        };
        if !self.requested_events.insert(event_id) {
            return;
        }
        let pending = self.scope.spawn(async move { api.get_event_pictures(event_id).await });
        self.enrichments.push((event_id, pending));
    }

    /// Picture fetches started so far, one per distinct event
    pub fn picture_requests(&self) -> usize {
        self.requested_events.len()
    }

    pub fn visible_entries(&self) -> Vec<&FeedEntry> {
        self.state.visible()
    }

    pub fn entries(&self) -> &[FeedEntry] {
        self.state.entries()
    }

    pub fn filter_mut(&mut self) -> &mut String {
        &mut self.state.filter_text
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.state.filter_text = text.into();
    }

    pub fn channel_status(&self) -> Option<ChannelStatus> {
        self.subscription.as_ref().map(FeedSubscription::status)
    }

    pub fn page_state(&self) -> &LoadState<u32> {
        &self.pages
    }

    pub fn is_loading(&self) -> bool {
        self.pending_page.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Requests still outstanding; zero once everything settled
    pub fn in_flight(&self) -> usize {
        self.enrichments.len() + usize::from(self.pending_page.is_some())
    }
}

fn photo_event(entry: &FeedEntry) -> Option<i64> {
    match entry {
        FeedEntry::Photo(photo) => photo.event_id,
        FeedEntry::Review(_) => None,
    }
}

impl Drop for FeedScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}
