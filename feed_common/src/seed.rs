//! Static fixture source used at bootstrap.
//!
//! Fixtures are described by `FixtureSeed` records whose start time is an offset
//! in minutes from the moment the process boots. A built-in set mirrors the demo
//! data of the feed; a JSON file with the same shape can replace it.
//!
//! Seeds are checked once, when they are turned into fixtures: a duplicate
//! fixture id, a duplicate team id inside one fixture, or a fixture without
//! teams is rejected so that startup fails instead of the projection silently
//! dropping events later on.

use std::collections::HashSet;
use std::io::BufRead;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FeedError;
use crate::fixture::{Fixture, Team, Tournament};
use crate::result::Result;

/// Team entry of a seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSeed {
    /// Team identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Bootstrap description of one fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSeed {
    /// Fixture identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Owning tournament.
    pub tournament: Tournament,
    /// Teams in configuration order.
    pub teams: Vec<TeamSeed>,
    /// Start time relative to boot, in minutes. Negative means already started.
    pub start_offset_minutes: i64,
}

impl FixtureSeed {
    fn new(
        offset_minutes: i64,
        id: &str,
        title: &str,
        tournament: (&str, &str),
        teams: &[(&str, &str)],
    ) -> Self {
        FixtureSeed {
            id: id.to_string(),
            title: title.to_string(),
            tournament: Tournament {
                id: tournament.0.to_string(),
                name: tournament.1.to_string(),
            },
            teams: teams
                .iter()
                .map(|(id, name)| TeamSeed {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            start_offset_minutes: offset_minutes,
        }
    }

    /// Materialize the fixture with its start time anchored at `seed_time`.
    pub fn to_fixture(&self, seed_time: DateTime<Utc>) -> Fixture {
        Fixture {
            id: self.id.clone(),
            title: self.title.clone(),
            tournament: self.tournament.clone(),
            teams: self
                .teams
                .iter()
                .map(|team| Team::new(&team.id, &team.name))
                .collect(),
            scheduled_start: seed_time + Duration::minutes(self.start_offset_minutes),
            winning_team_id: None,
        }
    }
}

/// The demo fixture set: three fixtures already under way and one starting later.
pub fn default_seeds() -> Vec<FixtureSeed> {
    vec![
        FixtureSeed::new(
            -15,
            "F1",
            "Title1",
            ("TO1", "Tournament1"),
            &[("TE1", "Team1"), ("TE2", "Team2")],
        ),
        FixtureSeed::new(
            -5,
            "F2",
            "Title1",
            ("TO1", "Tournament1"),
            &[("TE3", "Team3"), ("TE4", "Team4")],
        ),
        FixtureSeed::new(
            -1,
            "F3",
            "Title2",
            ("TO2", "Tournament2"),
            &[
                ("TE5", "Team5"),
                ("TE6", "Team6"),
                ("TE7", "Team7"),
                ("TE8", "Team8"),
            ],
        ),
        FixtureSeed::new(
            85,
            "F4",
            "Title1",
            ("TO1", "Tournament1"),
            &[("TE2", "Team2"), ("TE3", "Team3")],
        ),
    ]
}

/// Parse a JSON array of seeds.
pub fn parse_seeds<R: BufRead>(reader: R) -> Result<Vec<FixtureSeed>> {
    let seeds: Vec<FixtureSeed> = serde_json::from_reader(reader)?;
    Ok(seeds)
}

/// Validate the seeds and turn them into fixtures, keeping configuration order.
pub fn build_fixtures(seed_time: DateTime<Utc>, seeds: &[FixtureSeed]) -> Result<Vec<Fixture>> {
    let mut fixture_ids = HashSet::new();

    for seed in seeds {
        if !fixture_ids.insert(seed.id.as_str()) {
            return Err(FeedError::InvalidFixtures(format!(
                "duplicate fixture id '{}'",
                seed.id
            )));
        }
        if seed.teams.is_empty() {
            return Err(FeedError::InvalidFixtures(format!(
                "fixture '{}' has no teams",
                seed.id
            )));
        }
        let mut team_ids = HashSet::new();
        for team in &seed.teams {
            if !team_ids.insert(team.id.as_str()) {
                return Err(FeedError::InvalidFixtures(format!(
                    "duplicate team id '{}' in fixture '{}'",
                    team.id, seed.id
                )));
            }
        }
    }

    Ok(seeds.iter().map(|seed| seed.to_fixture(seed_time)).collect())
}
