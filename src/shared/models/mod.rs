//! Domain models exchanged with the REST API
//!
//! All payloads use the backend's snake_case JSON. Optional fields default to
//! absent so a sparse payload never fails the whole response.

pub mod bar;
pub mod beer;
pub mod event;
pub mod feed;
pub mod user;

pub use bar::{Bar, BarEvent};
pub use beer::{Beer, NewReview, Review, MAX_RATING, MIN_RATING};
pub use event::{Attendance, EventPicture, NewEventPicture};
pub use feed::{EntryKey, EntryKind, FeedEntry, FeedPage, PhotoPost, ReviewPost, TaggedUser};
pub use user::{LoginRequest, LoginResponse, User};
