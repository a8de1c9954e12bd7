//! Integration tests against a mock backend

pub mod api_client;
pub mod cable_transport;
pub mod session;
pub mod users_screen;
