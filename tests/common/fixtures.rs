//! Payload fixtures and preconfigured clients

use barhop::egui_app::{ApiClient, Config, Session};
use barhop::shared::{AppConfig, FeedOrdering};
use serde_json::{json, Value};
use std::path::Path;

pub fn session(user_id: i64) -> Session {
    Session {
        token: format!("token-{}", user_id),
        user_id,
        handle: Some("hops".to_string()),
    }
}

/// Client config pointing at `server_uri`, with the session file kept in `dir`
pub fn config_for(server_uri: &str, dir: &Path, ordering: FeedOrdering) -> Config {
    Config::with_builder(
        AppConfig::builder()
            .backend_url(server_uri)
            .session_file(dir.join("session.json"))
            .feed_ordering(ordering),
    )
    .expect("test config is valid")
}

pub fn api_for(config: &Config, session: Option<&Session>) -> ApiClient {
    ApiClient::new(config.clone()).with_session(session)
}

pub fn photo_json(id: i64, created_at: &str) -> Value {
    json!({
        "type": "feed_photo",
        "id": id,
        "created_at": created_at,
        "description": format!("photo {}", id),
        "event_id": 500 + id,
        "event_name": "Cask Night",
        "bar_name": "The Anchor",
        "tagged_users": [{"id": 3, "handle": "malt"}]
    })
}

pub fn review_json(id: i64, created_at: &str, beer: &str) -> Value {
    json!({
        "type": "feed_review",
        "id": id,
        "created_at": created_at,
        "beer_name": beer,
        "event_name": "Tap Takeover",
        "text": format!("notes on {}", beer),
        "rating": 4.5,
        "bar_id": 1
    })
}

pub fn picture_json(id: i64) -> Value {
    json!({
        "id": id,
        "description": "from the bar",
        "image_url": format!("https://cdn.example.com/{}.jpg", id),
        "tagged_users": []
    })
}

pub fn event_json(id: i64) -> Value {
    json!({"id": id, "name": "Cask Night", "bar_id": 1, "start_date": "2024-06-01T19:00:00Z"})
}
