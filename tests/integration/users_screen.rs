//! Friendship toggles commit only on success

use crate::common::*;
use barhop::egui_app::notice::Notices;
use barhop::egui_app::screens::{UsersScreen, WriteOutcome};
use barhop::shared::FeedOrdering;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn test_friendship_flag_follows_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "handle": "malt", "is_friend": false},
            {"id": 4, "handle": "hopsack", "friend": true}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/users/3/friendships"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/users/4/friendships"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let api = api_for(&config_for(&server.uri(), dir.path(), FeedOrdering::default()), Some(&session(7)));
    let mut screen = UsersScreen::new();
    let mut notices = Notices::new();

    screen.load(&api);
    assert!(wait_until(WAIT, || {
        screen.poll(&mut notices);
        screen.users().data().is_some()
    }));

    assert_eq!(screen.toggle_friend(&api, 3), WriteOutcome::Started);
    assert_eq!(screen.toggle_friend(&api, 4), WriteOutcome::Started);
    assert!(wait_until(WAIT, || {
        screen.poll(&mut notices);
        !screen.is_updating(3) && !screen.is_updating(4)
    }));

    let friends: Vec<(i64, bool)> = screen.visible_users().iter().map(|u| (u.id, u.is_friend)).collect();
    assert_eq!(friends, vec![(3, true), (4, true)]);
    assert!(notices.has_error());
}
