//! REST API Client
//!
//! One async method per endpoint under `{BACKEND_URL}/api/v1`. The client is
//! cheap to clone so it can be moved into background requests.

use crate::egui_app::config::Config;
use crate::egui_app::session::Session;
use crate::shared::models::{
    Attendance, Bar, BarEvent, Beer, EventPicture, FeedPage, LoginRequest, LoginResponse,
    NewEventPicture, NewReview, Review, User,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Request failed: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// A short message suitable for a notice
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotAuthenticated => "Please log in first".to_string(),
            ApiError::Status { status: 401, .. } => "Your session has expired".to_string(),
            ApiError::Status { status: 404, .. } => "Not found".to_string(),
            ApiError::Status { status: 409, .. } => "Already done".to_string(),
            ApiError::Status { status: 422, body } => format!("Rejected: {}", body),
            other => other.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    config: Config,
    client: Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
            token: None,
        }
    }

    /// Same client, acting as `session` (or anonymously)
    pub fn with_session(&self, session: Option<&Session>) -> Self {
        Self {
            config: self.config.clone(),
            client: self.client.clone(),
            token: session.map(|s| s.token.clone()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token {
            Some(ref token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    fn require_token(&self) -> Result<(), ApiError> {
        if self.token.is_none() {
            return Err(ApiError::NotAuthenticated);
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.api_url(path);
        tracing::debug!("GET {}", url);
        let response = self.authorize(self.client.get(&url)).send().await?;
        parse_json(check_status(response).await?).await
    }

    async fn send_write(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        self.require_token()?;
        let response = self.authorize(request).send().await?;
        check_status(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = self.config.api_url("/login");
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.client.post(&url).json(&request).send().await?;
        parse_json(check_status(response).await?).await
    }

    pub async fn get_bars(&self) -> Result<Vec<Bar>, ApiError> {
        self.get_json("/bars").await
    }

    pub async fn get_bar_events(&self, bar_id: i64) -> Result<Vec<BarEvent>, ApiError> {
        self.get_json(&format!("/bars/{}/events", bar_id)).await
    }

    pub async fn get_beers(&self) -> Result<Vec<Beer>, ApiError> {
        self.get_json("/beers").await
    }

    pub async fn get_beer(&self, beer_id: i64) -> Result<Beer, ApiError> {
        self.get_json(&format!("/beers/{}", beer_id)).await
    }

    pub async fn create_review(&self, beer_id: i64, review: &NewReview) -> Result<Review, ApiError> {
        let url = self.config.api_url(&format!("/beers/{}/reviews", beer_id));
        let body = serde_json::json!({ "review": review });
        let response = self.send_write(self.client.post(&url).json(&body)).await?;
        parse_json(response).await
    }

    pub async fn get_attendance(&self, event_id: i64) -> Result<Attendance, ApiError> {
        self.get_json(&format!("/events/{}/attendance", event_id)).await
    }

    /// Check in to an event; only a 2xx response counts
    pub async fn check_in(&self, event_id: i64) -> Result<(), ApiError> {
        let url = self.config.api_url(&format!("/events/{}/attendance", event_id));
        self.send_write(self.client.post(&url)).await?;
        Ok(())
    }

    pub async fn check_out(&self, event_id: i64) -> Result<(), ApiError> {
        let url = self.config.api_url(&format!("/events/{}/attendance", event_id));
        self.send_write(self.client.delete(&url)).await?;
        Ok(())
    }

    pub async fn get_attendees(&self, event_id: i64) -> Result<Vec<User>, ApiError> {
        self.get_json(&format!("/events/{}/attendees", event_id)).await
    }

    pub async fn get_event_pictures(&self, event_id: i64) -> Result<Vec<EventPicture>, ApiError> {
        self.get_json(&format!("/events/{}/event_pictures", event_id)).await
    }

    /// Multipart upload of a picture with its description and tags
    pub async fn upload_event_picture(
        &self,
        event_id: i64,
        picture: &NewEventPicture,
    ) -> Result<EventPicture, ApiError> {
        self.require_token()?;
        let bytes = tokio::fs::read(&picture.image_path).await?;
        let file_name = picture
            .image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo.jpg".to_string());

        let mut form = reqwest::multipart::Form::new()
            .part(
                "event_picture[image]",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            )
            .text("event_picture[description]", picture.description.clone());
        for id in &picture.tagged_user_ids {
            form = form.text("event_picture[tagged_user_ids][]", id.to_string());
        }

        let url = self.config.api_url(&format!("/events/{}/event_pictures", event_id));
        let response = self.send_write(self.client.post(&url).multipart(form)).await?;
        parse_json(response).await
    }

    pub async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/users").await
    }

    pub async fn add_friend(&self, user_id: i64) -> Result<(), ApiError> {
        let url = self.config.api_url(&format!("/users/{}/friendships", user_id));
        self.send_write(self.client.post(&url)).await?;
        Ok(())
    }

    pub async fn remove_friend(&self, user_id: i64) -> Result<(), ApiError> {
        let url = self.config.api_url(&format!("/users/{}/friendships", user_id));
        self.send_write(self.client.delete(&url)).await?;
        Ok(())
    }

    /// One page of the feed, newest first; pages start at 1
    pub async fn get_feed_page(&self, page: u32) -> Result<FeedPage, ApiError> {
        let items: Vec<serde_json::Value> = self.get_json(&format!("/feed?page={}", page)).await?;
        Ok(FeedPage::decode(items))
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_else(|_| status.to_string());
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
}
