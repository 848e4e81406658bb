//! Events flowing from the score generator to its subscribers.
//!
//! Both event kinds are immutable once built: fields are private and exposed
//! through accessors only. A `ScoreUpdate` carries the team's new absolute score,
//! not a delta.

/// "This team's score is now `score`."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreUpdate {
    fixture_id: String,
    team_id: String,
    score: u32,
}

impl ScoreUpdate {
    /// Build a score update.
    pub fn new(fixture_id: &str, team_id: &str, score: u32) -> Self {
        ScoreUpdate {
            fixture_id: String::from(fixture_id),
            team_id: String::from(team_id),
            score,
        }
    }

    /// Fixture the team plays in.
    pub fn fixture_id(&self) -> &str {
        &self.fixture_id
    }

    /// Team whose score changed.
    pub fn team_id(&self) -> &str {
        &self.team_id
    }

    /// The team's new score.
    pub fn score(&self) -> u32 {
        self.score
    }
}

/// "This team has won the fixture." Emitted at most once per fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinningTeamUpdate {
    fixture_id: String,
    team_id: String,
}

impl WinningTeamUpdate {
    /// Build a winning-team update.
    pub fn new(fixture_id: &str, team_id: &str) -> Self {
        WinningTeamUpdate {
            fixture_id: String::from(fixture_id),
            team_id: String::from(team_id),
        }
    }

    /// Decided fixture.
    pub fn fixture_id(&self) -> &str {
        &self.fixture_id
    }

    /// Winning team.
    pub fn team_id(&self) -> &str {
        &self.team_id
    }
}

impl From<&ScoreUpdate> for WinningTeamUpdate {
    fn from(update: &ScoreUpdate) -> Self {
        WinningTeamUpdate::new(update.fixture_id(), update.team_id())
    }
}
