//!
//! Common types and utilities shared by the live score generator and the
//! view-model projection that consumes its events.
//!
//! This crate aggregates:
//! - `error` — unified error type `FeedError` used across the workspace.
//! - `result` — handy `Result<T, FeedError>` alias.
//! - `fixture` — fixtures, teams and tournaments as served by the read path.
//! - `event` — immutable score and winning-team update events.
//! - `config` — generator tuning knobs and their defaults.
//! - `seed` — the static fixture source used at bootstrap.
#![warn(missing_docs)]
pub mod config;
pub mod error;
pub mod event;
pub mod fixture;
pub mod result;
pub mod seed;

pub use config::GeneratorConfig;
pub use error::FeedError;
pub use event::{ScoreUpdate, WinningTeamUpdate};
pub use fixture::{Fixture, FixtureState, Team, Tournament};
pub use result::Result;
