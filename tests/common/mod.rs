//! Common test utilities and helpers
//!
//! - JSON fixtures for the REST payloads
//! - A counting feed transport standing in for the websocket
//! - Polling helpers for controllers driven by background requests

pub mod fixtures;
pub mod mock_transport;

pub use fixtures::*;
pub use mock_transport::*;

use std::time::{Duration, Instant};

/// Call `step` until it returns true or `timeout` passes
pub fn wait_until(timeout: Duration, mut step: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if step() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

pub const WAIT: Duration = Duration::from_secs(5);
