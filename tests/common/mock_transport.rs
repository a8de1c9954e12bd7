//! Feed transport double that counts live subscriptions

use barhop::egui_app::feed::{ChannelError, ChannelEvent, ChannelHandle, FeedTransport, SubscribeRequest};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MockTransport {
    active: Arc<AtomicUsize>,
    opened: Mutex<Vec<SubscribeRequest>>,
    sender: Mutex<Option<Sender<ChannelEvent>>>,
    fail: bool,
}

struct MockHandle {
    active: Arc<AtomicUsize>,
    closed: bool,
}

impl ChannelHandle for MockHandle {
    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.active.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose connections can never be opened
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Subscriptions opened and not yet closed
    pub fn subscribers(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> Vec<SubscribeRequest> {
        self.opened.lock().unwrap().clone()
    }

    /// Deliver `event` to the most recent subscription
    pub fn emit(&self, event: ChannelEvent) {
        if let Some(tx) = self.sender.lock().unwrap().as_ref() {
            let _ = tx.send(event);
        }
    }
}

impl FeedTransport for MockTransport {
    fn open(
        &self,
        request: SubscribeRequest,
        events: Sender<ChannelEvent>,
    ) -> Result<Box<dyn ChannelHandle>, ChannelError> {
        if self.fail {
            return Err(ChannelError::Open("connection refused".to_string()));
        }
        self.opened.lock().unwrap().push(request);
        *self.sender.lock().unwrap() = Some(events);
        self.active.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockHandle {
            active: self.active.clone(),
            closed: false,
        }))
    }
}
