//! Error types shared by the feed crates.
//!
//! The `FeedError` enum unifies I/O, JSON, configuration and locking failures so
//! that every fallible function in the workspace can return a single error type
//! and use the `?` operator.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type for the live feed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// I/O error originating from the standard library or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Generator or CLI configuration outside the accepted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Static fixture data that breaks an identity rule (duplicate ids, no teams).
    #[error("Invalid fixture data: {0}")]
    InvalidFixtures(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),

    /// A subscriber callback panicked while an event was being delivered.
    #[error("Subscriber panicked: {0}")]
    SubscriberPanicked(String),

    /// The snapshot publisher panicked while publishing.
    #[error("Snapshot publisher panicked: {0}")]
    PublisherPanicked(String),
}

impl<T> From<PoisonError<T>> for FeedError {
    fn from(err: PoisonError<T>) -> Self {
        FeedError::MutexLock(err.to_string())
    }
}
