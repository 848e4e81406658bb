//! Core of the live score feed.
//!
//! - `decision`: "one in N" probability oracle used by the generator.
//! - `score_generator`: authoritative live scores and per-tick event batches.
//! - `broadcast`: subscriber registry fanning events out synchronously.
//! - `view_model`: sorted fixture projection with binary-search lookups.
//! - `live_data`: the projection behind a reader/writer lock, applying events.
//! - `publisher`: sink receiving a full snapshot after every change.
//! - `live_feed`: cancellable periodic task tying generator and broadcaster together.

pub mod broadcast;
pub mod decision;
pub mod live_data;
pub mod live_feed;
pub mod publisher;
pub mod score_generator;
pub mod view_model;
