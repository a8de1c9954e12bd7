//! Websocket feed transport against a local cable server

use assert_matches::assert_matches;
use barhop::egui_app::feed::{CableTransport, ChannelEvent, FeedTransport, SubscribeRequest};
use barhop::shared::cable::ChannelIdentifier;
use barhop::shared::models::FeedEntry;
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::sync::mpsc;
use std::time::Duration;
use tokio_tungstenite::tungstenite::Message;

const TIMEOUT: Duration = Duration::from_secs(5);

/// What the server sends once the client subscribed
#[derive(Clone, Copy)]
enum Script {
    ConfirmAndPush,
    Reject,
    Disconnect,
}

/// Serve one connection on a thread of its own; returns the ws url and the
/// text frames the client sent, delivered once the connection ends
fn serve(script: Script) -> (String, mpsc::Receiver<Vec<String>>) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();
    let (report_tx, report_rx) = mpsc::channel();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            let mut received = Vec::new();

            ws.send(Message::text(json!({"type": "welcome"}).to_string())).await.unwrap();
            let subscribe = match ws.next().await {
                Some(Ok(Message::Text(text))) => text.as_str().to_string(),
                other => panic!("Expected subscribe, got {:?}", other),
            };
            let identifier = serde_json::from_str::<Value>(&subscribe).unwrap()["identifier"]
                .as_str()
                .unwrap()
                .to_string();
            received.push(subscribe);

            let frames: Vec<Value> = match script {
                Script::ConfirmAndPush => vec![
                    json!({"type": "ping", "message": 1716400000}),
                    json!({
                        "identifier": "{\"channel\":\"OtherChannel\",\"user_id\":7}",
                        "type": "confirm_subscription"
                    }),
                    json!({"identifier": identifier, "type": "confirm_subscription"}),
                    json!({"identifier": identifier, "message": {"no": "discriminator"}}),
                    json!({"identifier": identifier, "message": {
                        "review": {"id": 4, "text": "Juicy", "beer_name": "NEIPA", "rating": 5}
                    }}),
                ],
                Script::Reject => vec![json!({"identifier": identifier, "type": "reject_subscription"})],
                Script::Disconnect => vec![json!({"type": "disconnect", "reason": "unauthorized"})],
            };
            for frame in frames {
                ws.send(Message::text(frame.to_string())).await.unwrap();
            }

            while let Some(Ok(message)) = ws.next().await {
                match message {
                    Message::Text(text) => received.push(text.as_str().to_string()),
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            let _ = report_tx.send(received);
        });
    });

    (format!("ws://{}/cable?token=t", addr), report_rx)
}

fn request(url: String) -> SubscribeRequest {
    SubscribeRequest {
        url,
        identifier: ChannelIdentifier::feed(7),
    }
}

#[test]
fn test_subscribe_push_and_unsubscribe_on_close() {
    let (url, report) = serve(Script::ConfirmAndPush);
    let (tx, rx) = mpsc::channel();
    let mut handle = CableTransport::new().open(request(url), tx).unwrap();

    assert_eq!(rx.recv_timeout(TIMEOUT).unwrap(), ChannelEvent::Connected);
    let pushed = rx.recv_timeout(TIMEOUT).unwrap();
    assert_matches!(pushed, ChannelEvent::Push(FeedEntry::Review(ref r)) if r.id == 4 && r.text == "Juicy");

    handle.close();
    let sent = report.recv_timeout(TIMEOUT).unwrap();
    let commands: Vec<Value> = sent.iter().map(|s| serde_json::from_str(s).unwrap()).collect();
    assert_eq!(commands[0]["command"], "subscribe");
    assert_eq!(commands.last().unwrap()["command"], "unsubscribe");
    let identifier: Value = serde_json::from_str(commands[0]["identifier"].as_str().unwrap()).unwrap();
    assert_eq!(identifier, json!({"channel": "FeedChannel", "user_id": 7}));
}

#[test]
fn test_rejected_subscription() {
    let (url, _report) = serve(Script::Reject);
    let (tx, rx) = mpsc::channel();
    let _handle = CableTransport::new().open(request(url), tx).unwrap();
    assert_eq!(rx.recv_timeout(TIMEOUT).unwrap(), ChannelEvent::Rejected);
}

#[test]
fn test_server_disconnect_ends_channel() {
    let (url, _report) = serve(Script::Disconnect);
    let (tx, rx) = mpsc::channel();
    let _handle = CableTransport::new().open(request(url), tx).unwrap();
    assert_eq!(
        rx.recv_timeout(TIMEOUT).unwrap(),
        ChannelEvent::Disconnected(Some("unauthorized".to_string()))
    );
}

#[test]
fn test_unreachable_server_reports_disconnect() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let (tx, rx) = mpsc::channel();
    let _handle = CableTransport::new()
        .open(request(format!("ws://127.0.0.1:{}/cable?token=t", port)), tx)
        .unwrap();
    assert_matches!(rx.recv_timeout(TIMEOUT).unwrap(), ChannelEvent::Disconnected(Some(_)));
}

#[test]
fn test_close_before_handshake_is_quiet() {
    // Accepts TCP in the backlog but never answers the upgrade.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();
    let mut handle = CableTransport::new()
        .open(request(format!("ws://{}/cable?token=t", addr)), tx)
        .unwrap();
    std::thread::sleep(Duration::from_millis(100));
    handle.close();
    handle.close();
    assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
    drop(listener);
}
