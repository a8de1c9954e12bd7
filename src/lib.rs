//! Barhop - Main Library
//!
//! Client for a social bar and beer check-in service: browse bars and beers,
//! check into events, post photos, review beers, manage friendships and follow
//! a live feed of what friends are doing.
//!
//! # Module Structure
//!
//! - **`shared`** - Platform-agnostic types
//!   - Domain models and the feed entry union
//!   - Realtime channel frames
//!   - Application configuration
//!   - Error types
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - REST client, session context, scoped background requests
//!   - Feed subscription and merge
//!   - Screen controllers and views
//!
//! # Usage
//!
//! ```rust,no_run
//! use barhop::egui_app::{AppState, Config};
//!
//! let config = Config::load().expect("valid configuration");
//! let mut state = AppState::new(config);
//! // Once per frame:
//! state.update();
//! ```
//!
//! # Threading
//!
//! egui runs on one thread and never awaits. Network work runs on background
//! threads with their own Tokio runtimes and reports through channels polled
//! every frame; see [`egui_app::tasks`].

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
pub mod egui_app;
