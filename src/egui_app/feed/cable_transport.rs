//! Websocket transport for the feed channel
//!
//! Each connection runs on its own thread with its own runtime, the same way
//! background requests do. The thread forwards channel events to the UI and
//! exits on server close, on error, or when the handle is closed.

use super::channel::{ChannelError, ChannelEvent, ChannelHandle, FeedTransport, SubscribeRequest};
use crate::shared::cable::{subscribe_command, unsubscribe_command, ServerFrame};
use crate::shared::models::FeedEntry;
use futures_util::{SinkExt, StreamExt};
use std::sync::mpsc::Sender;
use std::thread;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;

/// Action Cable over `tokio-tungstenite`
#[derive(Debug, Default, Clone, Copy)]
pub struct CableTransport;

impl CableTransport {
    pub fn new() -> Self {
        Self
    }
}

impl FeedTransport for CableTransport {
    fn open(
        &self,
        request: SubscribeRequest,
        events: Sender<ChannelEvent>,
    ) -> Result<Box<dyn ChannelHandle>, ChannelError> {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let thread = thread::Builder::new()
            .name("feed-channel".to_string())
            .spawn(move || run_connection(request, events, shutdown_rx))
            .map_err(|e| ChannelError::Open(e.to_string()))?;

        Ok(Box::new(CableHandle {
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        }))
    }
}

pub struct CableHandle {
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ChannelHandle for CableHandle {
    fn close(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            // Err means the connection thread already finished.
            let _ = tx.send(());
        }
        // Not joined: the thread finishes the unsubscribe on its own and the
        // UI must not wait on the network.
        self.thread.take();
    }
}

impl Drop for CableHandle {
    fn drop(&mut self) {
        self.close();
    }
}

fn run_connection(
    request: SubscribeRequest,
    events: Sender<ChannelEvent>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime for feed channel: {}", e);
            let _ = events.send(ChannelEvent::Disconnected(Some(e.to_string())));
            return;
        }
    };

    rt.block_on(async move {
        tracing::info!("Connecting feed channel for user {}", request.identifier.user_id);
        let connect = tokio_tungstenite::connect_async(request.url.as_str());
        let ws = tokio::select! {
            _ = &mut shutdown => {
                tracing::debug!("Feed channel closed before connecting");
                return;
            }
            result = connect => match result {
                Ok((ws, _response)) => ws,
                Err(e) => {
                    tracing::warn!("Feed channel connect failed: {}", e);
                    let _ = events.send(ChannelEvent::Disconnected(Some(e.to_string())));
                    return;
                }
            }
        };

        let (mut sink, mut stream) = ws.split();
        let mut subscribed = false;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    if subscribed {
                        let _ = sink.send(Message::text(unsubscribe_command(&request.identifier))).await;
                    }
                    let _ = sink.close().await;
                    tracing::debug!("Feed channel shut down by owner");
                    return;
                }
                frame = stream.next() => {
                    let text = match frame {
                        Some(Ok(Message::Text(text))) => text,
                        Some(Ok(Message::Close(_))) | None => {
                            let _ = events.send(ChannelEvent::Disconnected(None));
                            return;
                        }
                        Some(Ok(_)) => continue,
                        Some(Err(e)) => {
                            tracing::warn!("Feed channel read error: {}", e);
                            let _ = events.send(ChannelEvent::Disconnected(Some(e.to_string())));
                            return;
                        }
                    };

                    let parsed = match ServerFrame::parse(text.as_str()) {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::warn!("Ignoring malformed feed frame: {}", e);
                            continue;
                        }
                    };

                    let event = match parsed {
                        ServerFrame::Welcome => {
                            if !subscribed {
                                subscribed = true;
                                let command = subscribe_command(&request.identifier);
                                if let Err(e) = sink.send(Message::text(command)).await {
                                    let _ = events.send(ChannelEvent::Disconnected(Some(e.to_string())));
                                    return;
                                }
                            }
                            None
                        }
                        ServerFrame::Ping => None,
                        ServerFrame::Confirm { identifier } => {
                            ServerFrame::is_for(&identifier, &request.identifier)
                                .then_some(ChannelEvent::Connected)
                        }
                        ServerFrame::Reject { identifier } => {
                            ServerFrame::is_for(&identifier, &request.identifier)
                                .then_some(ChannelEvent::Rejected)
                        }
                        ServerFrame::Disconnect { reason } => {
                            let _ = events.send(ChannelEvent::Disconnected(reason));
                            return;
                        }
                        ServerFrame::Message { identifier, payload } => {
                            if !ServerFrame::is_for(&identifier, &request.identifier) {
                                continue;
                            }
                            match FeedEntry::from_push(payload) {
                                Ok(entry) => Some(ChannelEvent::Push(entry)),
                                Err(e) => {
                                    tracing::warn!("Dropping untagged feed push: {}", e);
                                    None
                                }
                            }
                        }
                    };

                    if let Some(event) = event {
                        if events.send(event).is_err() {
                            // Subscription dropped without closing; nobody is listening.
                            return;
                        }
                    }
                }
            }
        }
    });
}
