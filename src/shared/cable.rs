//! Realtime channel framing
//!
//! The backend speaks the Action Cable JSON protocol over a websocket:
//!
//! ```text
//! server: {"type":"welcome"}
//! client: {"command":"subscribe","identifier":"{\"channel\":\"FeedChannel\",\"user_id\":7}"}
//! server: {"identifier":"...","type":"confirm_subscription"}
//! server: {"type":"ping","message":1716400000}
//! server: {"identifier":"...","message":{"type":"feed_photo", ...}}
//! client: {"command":"unsubscribe","identifier":"..."}
//! ```
//!
//! The identifier is itself a JSON document serialized into a string, and the
//! server echoes it back verbatim.

use crate::shared::error::SharedError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FEED_CHANNEL: &str = "FeedChannel";

/// Channel name plus parameters, serialized as the `identifier` string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelIdentifier {
    pub channel: String,
    pub user_id: i64,
}

impl ChannelIdentifier {
    pub fn feed(user_id: i64) -> Self {
        Self {
            channel: FEED_CHANNEL.to_string(),
            user_id,
        }
    }

    pub fn encode(&self) -> String {
        // Two plain fields; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
struct Command<'a> {
    command: &'a str,
    identifier: &'a str,
}

pub fn subscribe_command(identifier: &ChannelIdentifier) -> String {
    command_text("subscribe", identifier)
}

pub fn unsubscribe_command(identifier: &ChannelIdentifier) -> String {
    command_text("unsubscribe", identifier)
}

fn command_text(command: &str, identifier: &ChannelIdentifier) -> String {
    let identifier = identifier.encode();
    serde_json::to_string(&Command {
        command,
        identifier: &identifier,
    })
    .unwrap_or_default()
}

/// A frame received from the server
#[derive(Debug, Clone, PartialEq)]
pub enum ServerFrame {
    Welcome,
    Ping,
    Confirm { identifier: String },
    Reject { identifier: String },
    Disconnect { reason: Option<String> },
    Message { identifier: String, payload: Value },
}

impl ServerFrame {
    pub fn parse(text: &str) -> Result<ServerFrame, SharedError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(mut map) = value else {
            return Err(SharedError::protocol("frame is not a JSON object"));
        };
        let identifier = map
            .get("identifier")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match map.get("type").and_then(Value::as_str) {
            Some("welcome") => Ok(ServerFrame::Welcome),
            Some("ping") => Ok(ServerFrame::Ping),
            Some("confirm_subscription") => Ok(ServerFrame::Confirm { identifier }),
            Some("reject_subscription") => Ok(ServerFrame::Reject { identifier }),
            Some("disconnect") => Ok(ServerFrame::Disconnect {
                reason: map.get("reason").and_then(Value::as_str).map(str::to_string),
            }),
            Some(other) => Err(SharedError::protocol(format!("unknown frame type '{}'", other))),
            None => match map.remove("message") {
                Some(payload) => Ok(ServerFrame::Message { identifier, payload }),
                None => Err(SharedError::protocol("frame without type or message")),
            },
        }
    }

    /// Whether the frame's identifier refers to `expected`.
    ///
    /// Identifiers are compared as JSON documents so key order and spacing
    /// chosen by the server do not matter.
    pub fn is_for(identifier: &str, expected: &ChannelIdentifier) -> bool {
        serde_json::from_str::<ChannelIdentifier>(identifier)
            .map(|parsed| &parsed == expected)
            .unwrap_or(false)
    }
}
