//! Property-based tests

pub mod feed_proptest;
