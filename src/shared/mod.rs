//! Shared Module
//!
//! Platform-agnostic types: the REST payloads, the feed entry union, the
//! realtime channel framing, configuration and shared errors. Nothing here
//! touches the network or the UI.

/// REST payload types
pub mod models;

/// Realtime channel framing
pub mod cable;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

pub use config::{AppConfig, AppConfigBuilder, ConfigError, FeedOrdering};
pub use error::SharedError;
pub use models::{EntryKey, EntryKind, FeedEntry};
