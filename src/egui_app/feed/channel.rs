//! Feed subscription channel
//!
//! One [`FeedSubscription`] per mounted feed screen. Opening it hands the
//! transport a sender; the transport reports [`ChannelEvent`]s which the
//! screen drains once per frame. Dropping or releasing the subscription always
//! closes the transport handle, whatever state the connection is in.

use crate::egui_app::config::Config;
use crate::egui_app::session::Session;
use crate::shared::cable::ChannelIdentifier;
use crate::shared::models::FeedEntry;
use std::sync::mpsc::{channel, Receiver, Sender};
use thiserror::Error;

/// Something the transport observed
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// The server confirmed the subscription
    Connected,
    /// The server refused the subscription
    Rejected,
    /// The connection ended, or never came up
    Disconnected(Option<String>),
    /// A newly created feed entry
    Push(FeedEntry),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("no session token; not subscribing")]
    MissingSession,
    #[error("could not open feed channel: {0}")]
    Open(String),
}

/// Where to connect and what to subscribe to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeRequest {
    pub url: String,
    pub identifier: ChannelIdentifier,
}

/// Opens realtime connections. The websocket implementation lives in
/// `cable_transport`; tests substitute their own.
pub trait FeedTransport: Send + Sync {
    fn open(
        &self,
        request: SubscribeRequest,
        events: Sender<ChannelEvent>,
    ) -> Result<Box<dyn ChannelHandle>, ChannelError>;
}

/// A live connection owned by a subscription
pub trait ChannelHandle: Send {
    /// Unsubscribe and tear down; must be safe to call before the connection
    /// is established
    fn close(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStatus {
    Connecting,
    Connected,
    Rejected,
    Closed,
}

pub struct FeedSubscription {
    handle: Option<Box<dyn ChannelHandle>>,
    events: Receiver<ChannelEvent>,
    status: ChannelStatus,
    user_id: i64,
}

impl FeedSubscription {
    /// Single attempt; no retry on failure
    pub fn open(
        transport: &dyn FeedTransport,
        config: &Config,
        session: Option<&Session>,
    ) -> Result<Self, ChannelError> {
        let session = session.ok_or(ChannelError::MissingSession)?;
        let url = config
            .cable_url(&session.token)
            .map_err(|e| ChannelError::Open(e.to_string()))?;
        let request = SubscribeRequest {
            url,
            identifier: ChannelIdentifier::feed(session.user_id),
        };

        let (tx, rx) = channel();
        let handle = transport.open(request, tx)?;
        tracing::info!("Feed subscription opened for user {}", session.user_id);

        Ok(Self {
            handle: Some(handle),
            events: rx,
            status: ChannelStatus::Connecting,
            user_id: session.user_id,
        })
    }

    /// Drain everything received since the last frame, in receipt order
    pub fn poll_events(&mut self) -> Vec<ChannelEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            match event {
                ChannelEvent::Connected => self.status = ChannelStatus::Connected,
                ChannelEvent::Rejected => self.status = ChannelStatus::Rejected,
                ChannelEvent::Disconnected(_) => self.status = ChannelStatus::Closed,
                ChannelEvent::Push(_) => {}
            }
            events.push(event);
        }
        events
    }

    pub fn status(&self) -> ChannelStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == ChannelStatus::Connected
    }

    pub fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.close();
            self.status = ChannelStatus::Closed;
            tracing::info!("Feed subscription released for user {}", self.user_id);
        }
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.release();
    }
}
