//! Fixture data model as served by the read path.
//!
//! A `Fixture` is a scheduled match between two or more `Team`s inside a
//! `Tournament`. The live parts of the model are each team's `score` and the
//! fixture's `winning_team_id`; everything else is fixed at bootstrap.
//!
//! JSON field names follow the feed's public shape (`scheduledStartTimeUnixSeconds`,
//! `winningTeamId`), with the start time encoded as unix seconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Tournament a fixture belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    /// Tournament identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A team taking part in a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Identifier, unique within its fixture.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Current score. Starts at 0 and never decreases.
    #[serde(default)]
    pub score: u32,
}

impl Team {
    /// Create a team with a zero score.
    pub fn new(id: &str, name: &str) -> Self {
        Team {
            id: String::from(id),
            name: String::from(name),
            score: 0,
        }
    }
}

/// Lifecycle stage of a fixture, derived from its live data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FixtureState {
    /// No score has been applied yet.
    Scheduled,
    /// At least one score update has been applied.
    Live,
    /// A winning team has been recorded.
    Decided,
}

/// A scheduled match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// Unique fixture identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Owning tournament.
    pub tournament: Tournament,
    /// Teams in configuration order (sorted by id once projected).
    pub teams: Vec<Team>,
    /// Scheduled kick-off.
    #[serde(
        rename = "scheduledStartTimeUnixSeconds",
        with = "chrono::serde::ts_seconds"
    )]
    pub scheduled_start: DateTime<Utc>,
    /// Winning team, once the fixture is decided.
    #[serde(rename = "winningTeamId", default)]
    pub winning_team_id: Option<String>,
}

impl Fixture {
    /// Derive the lifecycle stage from the winner and team scores.
    ///
    /// Scores only move through events and the first event for a team always
    /// carries a score of at least 1, so any non-zero score means the fixture
    /// has gone live.
    pub fn state(&self) -> FixtureState {
        if self.winning_team_id.is_some() {
            FixtureState::Decided
        } else if self.teams.iter().any(|team| team.score > 0) {
            FixtureState::Live
        } else {
            FixtureState::Scheduled
        }
    }
}
