//! REST client against a wiremock backend

use crate::common::*;
use assert_matches::assert_matches;
use barhop::egui_app::ApiError;
use barhop::shared::models::{FeedEntry, NewReview};
use barhop::shared::FeedOrdering;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, tempfile::TempDir) {
    (MockServer::start().await, tempfile::tempdir().unwrap())
}

#[tokio::test]
async fn test_login_returns_session_fields() {
    let (server, dir) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .and(body_json(json!({"email": "a@b.co", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "t1", "id": 7, "handle": "hops"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server.uri(), dir.path(), FeedOrdering::default());
    let response = api_for(&config, None).login("a@b.co", "pw").await.unwrap();
    assert_eq!(response.token, "t1");
    assert_eq!(response.user_id, 7);
    assert_eq!(response.handle.as_deref(), Some("hops"));
}

#[tokio::test]
async fn test_reads_send_bearer_token() {
    let (server, dir) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/bars"))
        .and(header("Authorization", "Bearer token-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "The Anchor", "latitude": 51.5, "longitude": -0.12},
            {"id": 2, "name": "Brewdog"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server.uri(), dir.path(), FeedOrdering::default());
    let bars = api_for(&config, Some(&session(7))).get_bars().await.unwrap();
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].location(), Some((51.5, -0.12)));
    assert_eq!(bars[1].location(), None);
}

#[tokio::test]
async fn test_feed_page_decodes_both_variants() {
    let (server, dir) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/feed"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            photo_json(1, "2024-06-01T10:00:00Z"),
            review_json(2, "2024-06-01T09:00:00Z", "Stout")
        ])))
        .mount(&server)
        .await;

    let config = config_for(&server.uri(), dir.path(), FeedOrdering::default());
    let page = api_for(&config, Some(&session(7))).get_feed_page(2).await.unwrap();
    assert_eq!(page.skipped, 0);
    assert_matches!(&page.entries[0], FeedEntry::Photo(p) if p.id == 1 && p.tagged_users.len() == 1);
    assert_matches!(&page.entries[1], FeedEntry::Review(r) if r.beer_name.as_deref() == Some("Stout"));
}

#[tokio::test]
async fn test_review_is_wrapped() {
    let (server, dir) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/beers/3/reviews"))
        .and(body_json(json!({"review": {"text": "Crisp", "rating": 4}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 99, "text": "Crisp", "rating": 4})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server.uri(), dir.path(), FeedOrdering::default());
    let review = NewReview { text: "Crisp".to_string(), rating: 4, event_id: None };
    let created = api_for(&config, Some(&session(7))).create_review(3, &review).await.unwrap();
    assert_eq!(created.id, 99);
}

#[tokio::test]
async fn test_non_2xx_check_in_is_an_error() {
    let (server, dir) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/events/5/attendance"))
        .respond_with(ResponseTemplate::new(422).set_body_string("already checked in elsewhere"))
        .mount(&server)
        .await;

    let config = config_for(&server.uri(), dir.path(), FeedOrdering::default());
    let err = api_for(&config, Some(&session(7))).check_in(5).await.unwrap_err();
    assert_matches!(err, ApiError::Status { status: 422, ref body } if body.contains("elsewhere"));
}

#[tokio::test]
async fn test_writes_need_a_token() {
    let (server, dir) = setup().await;
    let config = config_for(&server.uri(), dir.path(), FeedOrdering::default());
    let err = api_for(&config, None).add_friend(4).await.unwrap_err();
    assert_matches!(err, ApiError::NotAuthenticated);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_friendship_verbs() {
    let (server, dir) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/users/4/friendships"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/users/4/friendships"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server.uri(), dir.path(), FeedOrdering::default());
    let api = api_for(&config, Some(&session(7)));
    api.add_friend(4).await.unwrap();
    api.remove_friend(4).await.unwrap();
}

#[tokio::test]
async fn test_picture_upload_is_multipart() {
    let (server, dir) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/events/5/event_pictures"))
        .and(header_exists("content-type"))
        .respond_with(ResponseTemplate::new(201).set_body_json(picture_json(12)))
        .expect(1)
        .mount(&server)
        .await;

    let image = dir.path().join("pint.jpg");
    std::fs::write(&image, b"\xFF\xD8\xFF fake jpeg").unwrap();
    let picture = barhop::shared::models::NewEventPicture {
        image_path: image,
        description: "First pint".to_string(),
        tagged_user_ids: vec![3, 4],
    };

    let config = config_for(&server.uri(), dir.path(), FeedOrdering::default());
    let created = api_for(&config, Some(&session(7))).upload_event_picture(5, &picture).await.unwrap();
    assert_eq!(created.id, 12);

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap().to_string();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("event_picture[description]"));
    assert!(body.contains("First pint"));
    assert_eq!(body.matches("event_picture[tagged_user_ids][]").count(), 2);
}

#[tokio::test]
async fn test_missing_upload_file_is_io_error() {
    let (server, dir) = setup().await;
    let picture = barhop::shared::models::NewEventPicture {
        image_path: dir.path().join("missing.jpg"),
        description: String::new(),
        tagged_user_ids: vec![],
    };
    let config = config_for(&server.uri(), dir.path(), FeedOrdering::default());
    let err = api_for(&config, Some(&session(7))).upload_event_picture(5, &picture).await.unwrap_err();
    assert_matches!(err, ApiError::Io(_));
}
