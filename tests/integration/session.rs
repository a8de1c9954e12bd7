//! Session transitions through the app state

use crate::common::*;
use barhop::egui_app::{AppState, AppView, SessionStore};
use barhop::shared::FeedOrdering;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_clears_session_and_later_mounts_are_anonymous() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server.uri(), dir.path(), FeedOrdering::default());
    SessionStore::new(config.session_file()).save(&session(7)).unwrap();

    let transport = Arc::new(MockTransport::new());
    let mut state = AppState::with_transport(config.clone(), transport.clone());
    assert!(state.is_logged_in());
    assert!(state.api().is_authenticated());
    assert_eq!(state.current_view(), AppView::Feed);
    assert_eq!(transport.subscribers(), 1);

    state.logout();
    state.update();
    assert_eq!(transport.subscribers(), 0);
    assert_eq!(state.current_view(), AppView::Auth);
    assert!(!state.api().is_authenticated());
    assert!(!config.session_file().exists());

    let restarted = AppState::with_transport(config, transport.clone());
    assert!(!restarted.is_logged_in());
    assert!(!restarted.api().is_authenticated());
    assert_eq!(restarted.current_view(), AppView::Auth);
    assert_eq!(transport.subscribers(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_persists_and_opens_feed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "fresh", "user_id": 12})))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server.uri(), dir.path(), FeedOrdering::default());
    let transport = Arc::new(MockTransport::new());
    let mut state = AppState::with_transport(config.clone(), transport.clone());
    assert_eq!(state.current_view(), AppView::Auth);

    state.email_input = "pat@example.com".to_string();
    state.password_input = "secret".to_string();
    state.handle_login();
    assert!(wait_until(WAIT, || {
        state.update();
        state.is_logged_in()
    }));

    assert_eq!(state.current_view(), AppView::Feed);
    assert!(state.password_input.is_empty());
    assert_eq!(transport.opened()[0].identifier.user_id, 12);
    let stored = SessionStore::new(config.session_file()).load().unwrap().unwrap();
    assert_eq!(stored.token, "fresh");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bad_credentials_show_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server.uri(), dir.path(), FeedOrdering::default());
    let mut state = AppState::with_transport(config, Arc::new(MockTransport::new()));

    state.handle_login();
    assert_eq!(state.login_error.as_deref(), Some("Email and password are required"));

    state.email_input = "pat@example.com".to_string();
    state.password_input = "wrong".to_string();
    state.handle_login();
    assert!(wait_until(WAIT, || {
        state.update();
        !state.is_logging_in()
    }));
    assert_eq!(state.login_error.as_deref(), Some("Invalid email or password"));
    assert!(!state.is_logged_in());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_anonymous_write_redirects_to_login() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server.uri(), dir.path(), FeedOrdering::default());
    let mut state = AppState::with_transport(config, Arc::new(MockTransport::new()));
    state.navigate(AppView::Users);

    let api = state.api().clone();
    let outcome = state.users.toggle_friend(&api, 3);
    state.handle_outcome(outcome);
    assert_eq!(state.current_view(), AppView::Auth);
    assert!(!state.notices.is_empty());
}

fn log_in_as(state: &mut AppState, email: &str) {
    state.email_input = email.to_string();
    state.password_input = "secret".to_string();
    state.handle_login();
    assert!(wait_until(WAIT, || {
        state.update();
        state.is_logged_in()
    }));
}

fn loaded_friend_flag(state: &mut AppState, user_id: i64) -> bool {
    state.navigate(AppView::Users);
    assert!(wait_until(WAIT, || {
        state.update();
        state.users.users().data().is_some()
    }));
    state.users.visible_users().iter().find(|u| u.id == user_id).unwrap().is_friend
}

#[tokio::test(flavor = "multi_thread")]
async fn test_switching_users_refetches_per_user_data() {
    let server = MockServer::start().await;
    for (email, id) in [("seven@example.com", 7), ("eight@example.com", 8)] {
        Mock::given(method("POST"))
            .and(path("/api/v1/login"))
            .and(body_partial_json(json!({"email": email})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": format!("token-{}", id), "user_id": id})))
            .mount(&server)
            .await;
    }
    for (token, is_friend) in [("Bearer token-7", true), ("Bearer token-8", false)] {
        Mock::given(method("GET"))
            .and(path("/api/v1/users"))
            .and(header("Authorization", token))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 3, "handle": "malt", "is_friend": is_friend}])))
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/api/v1/users/3/friendships"))
        .and(header("Authorization", "Bearer token-8"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server.uri(), dir.path(), FeedOrdering::default());
    let mut state = AppState::with_transport(config, Arc::new(MockTransport::new()));

    log_in_as(&mut state, "seven@example.com");
    assert!(loaded_friend_flag(&mut state, 3));

    state.logout();
    state.update();
    assert!(state.users.users().data().is_none());

    log_in_as(&mut state, "eight@example.com");
    assert!(!loaded_friend_flag(&mut state, 3));

    let api = state.api().clone();
    assert_eq!(state.users.toggle_friend(&api, 3), barhop::egui_app::screens::WriteOutcome::Started);
    assert!(wait_until(WAIT, || {
        state.update();
        !state.users.is_updating(3)
    }));
    assert!(state.users.visible_users()[0].is_friend);
}
