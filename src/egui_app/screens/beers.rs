//! Beer list, beer detail with reviews, and the review form

use super::{abandon, settle, Fetch, WriteOutcome};
use crate::egui_app::api::ApiClient;
use crate::egui_app::load::{LoadAction, LoadState};
use crate::egui_app::notice::Notices;
use crate::egui_app::tasks::{take_ready, Scope};
use crate::shared::models::{Beer, NewReview, Review, MAX_RATING};

pub struct BeersScreen {
    scope: Scope,
    beers: LoadState<Vec<Beer>>,
    pending_beers: Fetch<Vec<Beer>>,
    pub filter_text: String,
    detail: LoadState<Beer>,
    pending_detail: Fetch<Beer>,
    pub review_text: String,
    pub review_rating: u8,
    submitting: Fetch<Review>,
    reviewed_beer: Option<i64>,
}

impl Default for BeersScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl BeersScreen {
    pub fn new() -> Self {
        Self {
            scope: Scope::new(),
            beers: LoadState::Idle,
            pending_beers: None,
            filter_text: String::new(),
            detail: LoadState::Idle,
            pending_detail: None,
            review_text: String::new(),
            review_rating: MAX_RATING,
            submitting: None,
            reviewed_beer: None,
        }
    }

    pub fn load(&mut self, api: &ApiClient) {
        if matches!(self.beers, LoadState::Loaded(_) | LoadState::Loading) {
            return;
        }
        self.beers.dispatch(LoadAction::Start);
        let api = api.clone();
        self.pending_beers = Some(self.scope.spawn(async move { api.get_beers().await }));
    }

    pub fn open(&mut self, api: &ApiClient, beer_id: i64) {
        self.detail.dispatch(LoadAction::Start);
        self.review_text.clear();
        self.review_rating = MAX_RATING;
        let api = api.clone();
        self.pending_detail = Some(self.scope.spawn(async move { api.get_beer(beer_id).await }));
    }

    pub fn close(&mut self) {
        self.detail.dispatch(LoadAction::Reset);
        self.pending_detail = None;
    }

    pub fn submit_review(&mut self, api: &ApiClient) -> WriteOutcome {
        if !api.is_authenticated() {
            return WriteOutcome::LoginRequired;
        }
        if self.submitting.is_some() {
            return WriteOutcome::Busy;
        }
        let Some(beer_id) = self.detail.data().map(|b| b.id) else {
            return WriteOutcome::Invalid("Open a beer first".to_string());
        };
        let review = NewReview {
            text: self.review_text.trim().to_string(),
            rating: self.review_rating,
            event_id: None,
        };
        if let Err(e) = review.validate() {
            return WriteOutcome::invalid(e);
        }

        tracing::info!("Posting review for beer {}", beer_id);
        let api = api.clone();
        self.submitting = Some(self.scope.spawn(async move { api.create_review(beer_id, &review).await }));
        self.reviewed_beer = Some(beer_id);
        WriteOutcome::Started
    }

    pub fn poll(&mut self, notices: &mut Notices) {
        settle(&mut self.beers, &mut self.pending_beers, "beers");
        settle(&mut self.detail, &mut self.pending_detail, "beer detail");

        match take_ready(&mut self.submitting) {
            Some(Ok(review)) => {
                let beer_id = self.reviewed_beer.take();
                if let Some(beer) = self.detail.data_mut().filter(|b| Some(b.id) == beer_id) {
                    beer.reviews.insert(0, review);
                }
                self.review_text.clear();
                notices.info("Review posted");
            }
            Some(Err(e)) => {
                self.reviewed_beer = None;
                notices.error(format!("Could not post review: {}", e.user_message()));
            }
            None => {}
        }
    }

    pub fn unmount(&mut self) {
        self.scope.invalidate();
        abandon(&mut self.beers, &mut self.pending_beers);
        abandon(&mut self.detail, &mut self.pending_detail);
        self.submitting = None;
        self.reviewed_beer = None;
    }

    pub fn beers(&self) -> &LoadState<Vec<Beer>> {
        &self.beers
    }

    pub fn visible_beers(&self) -> Vec<&Beer> {
        match self.beers.data() {
            Some(beers) => beers.iter().filter(|b| b.matches(&self.filter_text)).collect(),
            None => Vec::new(),
        }
    }

    pub fn detail(&self) -> &LoadState<Beer> {
        &self.detail
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }
}
