//! Background requests scoped to a screen's lifetime
//!
//! The UI thread never awaits. A request runs on its own thread with a
//! single-threaded Tokio runtime and reports through an mpsc channel that the
//! screen polls once per frame. Every [`Pending`] remembers the generation of
//! the [`Scope`] that spawned it; once the scope is invalidated (unmount,
//! logout) late results are dropped instead of being applied.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;

/// Generation counter owned by a screen
#[derive(Debug, Clone, Default)]
pub struct Scope {
    generation: Arc<AtomicU64>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Orphan everything spawned so far
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Run `future` in the background, tied to this scope
    pub fn spawn<T, F>(&self, future: F) -> Pending<T>
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::error!("Failed to create runtime for background request: {}", e);
                    return;
                }
            };
            let result = rt.block_on(future);
            // The receiver is gone when the screen dropped the request.
            let _ = tx.send(result);
        });
        Pending {
            rx,
            generation: self.generation(),
            scope: self.clone(),
        }
    }
}

/// What polling a [`Pending`] produced this frame
#[derive(Debug, PartialEq)]
pub enum Poll<T> {
    /// Still running
    Waiting,
    /// Finished while its scope is still current
    Ready(T),
    /// Finished or died after the scope moved on; nothing to apply
    Gone,
}

/// A background request whose result has not been consumed yet
pub struct Pending<T> {
    rx: Receiver<T>,
    generation: u64,
    scope: Scope,
}

impl<T> Pending<T> {
    pub fn is_stale(&self) -> bool {
        self.scope.generation() != self.generation
    }

    /// Non-blocking check for the result
    pub fn poll(&self) -> Poll<T> {
        if self.is_stale() {
            return Poll::Gone;
        }
        match self.rx.try_recv() {
            Ok(value) => Poll::Ready(value),
            Err(TryRecvError::Empty) => Poll::Waiting,
            Err(TryRecvError::Disconnected) => Poll::Gone,
        }
    }
}

/// Poll an optional pending slot, clearing it once it resolves either way
pub fn take_ready<T>(slot: &mut Option<Pending<T>>) -> Option<T> {
    let outcome = slot.as_ref()?.poll();
    match outcome {
        Poll::Waiting => None,
        Poll::Ready(value) => {
            *slot = None;
            Some(value)
        }
        Poll::Gone => {
            tracing::debug!("Discarding result of an orphaned request");
            *slot = None;
            None
        }
    }
}
