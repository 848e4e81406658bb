//! Live data server: the view model behind a reader/writer lock.
//!
//! `LiveDataServer` is both the subscriber side of the event stream and the read
//! side served to clients:
//!
//! - Writes (`apply_score_update`, `apply_winner_update`) take the write lock, look
//!   the target up by binary search, overwrite the value carried by the event and
//!   publish the full snapshot before the lock is released. Publishing under the
//!   write lock ties publish latency to mutation latency; readers wait for both.
//! - An event naming an unknown fixture or team is logged and dropped.
//! - A publish failure is logged; the in-memory change is kept. A panicking
//!   publisher is caught before it can poison the lock.
//! - The first winner recorded for a fixture is final; a conflicting winner event
//!   is logged and dropped.
//! - Reads (`fixture`, `fixture_team`, `snapshot`, `snapshot_json`) take the read lock
//!   and return owned copies, so a reader always sees the last applied state.
//!
//! Scores are overwritten, never incremented: the generator's events carry the
//! authoritative value, so replaying them rebuilds the same projection.

use crate::model::broadcast::{ScoreUpdateReceiver, WinningTeamUpdateReceiver, catch_panic};
use crate::model::publisher::SnapshotPublisher;
use crate::model::view_model::ViewModel;
use feed_common::{FeedError, Fixture, Result, ScoreUpdate, Team, WinningTeamUpdate};
use log::{error, info, warn};
use std::sync::RwLock;

/// Projection of the live fixtures plus the sink its snapshots go to.
pub struct LiveDataServer {
    view_model: RwLock<ViewModel>,
    publisher: Box<dyn SnapshotPublisher>,
}

impl LiveDataServer {
    /// Take ownership of `view_model` and sort it so lookups can start.
    pub fn new(mut view_model: ViewModel, publisher: Box<dyn SnapshotPublisher>) -> Self {
        view_model.sort();
        Self {
            view_model: RwLock::new(view_model),
            publisher,
        }
    }

    /// Set a team's score. Returns `Ok(false)` when the event names an unknown fixture or team.
    pub fn apply_score_update(&self, fixture_id: &str, team_id: &str, new_score: u32) -> Result<bool> {
        let mut view_model = self.view_model.write()?;

        let Some(team) = view_model.find_fixture_team_mut(fixture_id, team_id) else {
            warn!(
                "Score update skipped: fixture '{}' or team '{}' not found",
                fixture_id, team_id
            );
            return Ok(false);
        };
        team.score = new_score;

        self.publish_locked(&view_model);
        Ok(true)
    }

    /// Record a fixture's winner. Returns `Ok(false)` when the fixture is unknown
    /// or already has a different winner.
    pub fn apply_winner_update(&self, fixture_id: &str, team_id: &str) -> Result<bool> {
        let mut view_model = self.view_model.write()?;

        let Some(fixture) = view_model.find_fixture_mut(fixture_id) else {
            warn!("Winner update skipped: fixture '{}' not found", fixture_id);
            return Ok(false);
        };
        if let Some(winner) = fixture.winning_team_id.as_deref().filter(|winner| *winner != team_id) {
            warn!(
                "Winner update skipped: fixture '{}' already won by '{}', not '{}'",
                fixture_id, winner, team_id
            );
            return Ok(false);
        }
        fixture.winning_team_id = Some(team_id.to_string());
        info!("Fixture {} is now {}, winner {}", fixture_id, fixture.state(), team_id);

        self.publish_locked(&view_model);
        Ok(true)
    }

    /// Publish the current snapshot, e.g. once at startup.
    pub fn publish_snapshot(&self) -> Result<()> {
        let view_model = self.view_model.read()?;
        catch_panic(|| self.publisher.publish(&view_model)).map_err(FeedError::PublisherPanicked)?
    }

    /// Copy of one fixture.
    pub fn fixture(&self, fixture_id: &str) -> Result<Option<Fixture>> {
        let view_model = self.view_model.read()?;
        Ok(view_model.find_fixture(fixture_id).cloned())
    }

    /// Copy of one team of a fixture.
    pub fn fixture_team(&self, fixture_id: &str, team_id: &str) -> Result<Option<Team>> {
        let view_model = self.view_model.read()?;
        Ok(view_model.find_fixture_team(fixture_id, team_id).cloned())
    }

    /// Copy of the whole projection.
    pub fn snapshot(&self) -> Result<ViewModel> {
        Ok(self.view_model.read()?.clone())
    }

    /// JSON rendering of the whole projection, as served by the read path.
    pub fn snapshot_json(&self) -> Result<Vec<u8>> {
        let view_model = self.view_model.read()?;
        Ok(serde_json::to_vec(&*view_model)?)
    }

    fn publish_locked(&self, view_model: &ViewModel) {
        match catch_panic(|| self.publisher.publish(view_model)) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("Error publishing view model: {}", e),
            Err(message) => error!("{}", FeedError::PublisherPanicked(message)),
        }
    }
}

impl ScoreUpdateReceiver for LiveDataServer {
    fn receive_score(&self, update: ScoreUpdate) {
        if let Err(e) = self.apply_score_update(update.fixture_id(), update.team_id(), update.score()) {
            error!("Failed to apply score update: {}", e);
        }
    }
}

impl WinningTeamUpdateReceiver for LiveDataServer {
    fn receive_winner(&self, update: WinningTeamUpdate) {
        if let Err(e) = self.apply_winner_update(update.fixture_id(), update.team_id()) {
            error!("Failed to apply winner update: {}", e);
        }
    }
}
