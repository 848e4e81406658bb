//! Live score feed server.
//!
//! Simulates live sporting fixtures and keeps a query-optimized projection of them
//! up to date. The pipeline, leaves first:
//!
//! - `DecisionGate`: "one in N" coin flips steering the simulation.
//! - `ScoreGenerator`: owns the authoritative scores and turns each tick into a
//!   batch of `ScoreUpdate`s plus the `WinningTeamUpdate`s derived from them.
//! - `Broadcaster`: delivers both event kinds synchronously, in registration
//!   order, to every registered subscriber.
//! - `LiveDataServer`: sorted `ViewModel` behind a reader/writer lock; applies
//!   events by binary search and publishes a full snapshot after each change.
//! - `LiveFeed`: cancellable background thread running one tick per interval.
//!
//! The composition root lives in `main`; nothing here is a global.
#![warn(missing_docs)]
pub mod args;
pub mod model;
