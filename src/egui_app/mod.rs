//! egui Native Desktop App Module
//!
//! The desktop client for the bar and beer check-in service.
//!
//! # Architecture
//!
//! Everything with behaviour lives in egui-free modules so it can be tested
//! without a window:
//!
//! - **`config`** - REST and realtime URLs derived from [`AppConfig`](crate::shared::AppConfig)
//! - **`session`** - Session file and the process-wide session context
//! - **`api`** - Async REST client, one method per endpoint
//! - **`tasks`** - Background requests scoped to a screen's lifetime
//! - **`load`** - `LoadState` and its reducer
//! - **`notice`** - Transient notices for write outcomes
//! - **`feed`** - Feed subscription channel, merge policy, feed screen
//! - **`map`** - Marker clustering for the bars map
//! - **`screens`** - Controllers for bars, beers, events and users
//! - **`state`** - `AppState`, tying session, API client and screens together
//!
//! Rendering is in `views` and `theme`; `main.rs` is the `barhop` binary.
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── main.rs      - Binary entry point
//! ├── config.rs    - Client configuration
//! ├── session.rs   - Session store and context
//! ├── api.rs       - REST client
//! ├── tasks.rs     - Scoped background requests
//! ├── load.rs      - Load state reducer
//! ├── notice.rs    - Notices
//! ├── types.rs     - AppView
//! ├── feed/        - Live feed
//! ├── map/         - Clustering
//! ├── screens/     - Screen controllers
//! ├── state/       - AppState
//! ├── theme/       - Colors and frames
//! └── views/       - egui rendering
//! ```

pub mod api;
pub mod config;
pub mod feed;
pub mod load;
pub mod map;
pub mod notice;
pub mod screens;
pub mod session;
pub mod state;
pub mod tasks;
pub mod theme;
pub mod types;
pub mod views;

// Re-export commonly used types
pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use load::{LoadAction, LoadState};
pub use session::{Session, SessionChange, SessionContext, SessionStore};
pub use state::AppState;
pub use types::AppView;
