//! Live social feed: subscription channel, merge policy and the screen
//! controller composing them with paged REST loads.

pub mod cable_transport;
pub mod channel;
pub mod merge;
pub mod screen;

pub use cable_transport::CableTransport;
pub use channel::{ChannelError, ChannelEvent, ChannelHandle, ChannelStatus, FeedSubscription, FeedTransport, SubscribeRequest};
pub use merge::{filter_entries, FeedState};
pub use screen::FeedScreen;
