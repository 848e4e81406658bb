//! In-process fan-out of score and winning-team events.
//!
//! The `Broadcaster` keeps two independent subscriber lists, one per event kind,
//! each behind its own `RwLock`. Registration takes the write lock; delivery holds
//! the read lock for the whole fan-out, so a subscriber registered while a delivery
//! is running may or may not see that event, but registration never races with it.
//!
//! Delivery is synchronous and in registration order. Every subscriber receives its
//! own copy of the event. A subscriber that panics is logged and skipped; the
//! remaining subscribers still get the event.

use feed_common::{FeedError, Result, ScoreUpdate, WinningTeamUpdate};
use log::error;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

/// Receives score updates.
pub trait ScoreUpdateReceiver: Send + Sync {
    /// Handle one update. Receivers cannot report failure back to the publisher.
    fn receive_score(&self, update: ScoreUpdate);
}

/// Receives winning-team updates.
pub trait WinningTeamUpdateReceiver: Send + Sync {
    /// Handle one update.
    fn receive_winner(&self, update: WinningTeamUpdate);
}

/// Registry of subscribers for both event kinds.
#[derive(Default)]
pub struct Broadcaster {
    score_receivers: RwLock<Vec<Arc<dyn ScoreUpdateReceiver>>>,
    winner_receivers: RwLock<Vec<Arc<dyn WinningTeamUpdateReceiver>>>,
}

impl Broadcaster {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append score subscribers, keeping their order.
    pub fn register_score_receivers<I>(&self, receivers: I) -> Result<()>
    where
        I: IntoIterator<Item = Arc<dyn ScoreUpdateReceiver>>,
    {
        self.score_receivers.write()?.extend(receivers);
        Ok(())
    }

    /// Append winning-team subscribers, keeping their order.
    pub fn register_winner_receivers<I>(&self, receivers: I) -> Result<()>
    where
        I: IntoIterator<Item = Arc<dyn WinningTeamUpdateReceiver>>,
    {
        self.winner_receivers.write()?.extend(receivers);
        Ok(())
    }

    /// Number of registered score subscribers.
    pub fn score_receiver_count(&self) -> Result<usize> {
        Ok(self.score_receivers.read()?.len())
    }

    /// Number of registered winning-team subscribers.
    pub fn winner_receiver_count(&self) -> Result<usize> {
        Ok(self.winner_receivers.read()?.len())
    }

    /// Deliver `update` to every score subscriber.
    ///
    /// Returns how many subscribers handled it without panicking.
    pub fn publish_score(&self, update: &ScoreUpdate) -> Result<usize> {
        let receivers = self.score_receivers.read()?;
        let mut delivered = 0;

        for receiver in receivers.iter() {
            let event = update.clone();
            match deliver(|| receiver.receive_score(event)) {
                Ok(()) => delivered += 1,
                Err(e) => error!(
                    "Score subscriber failed on {}/{}: {}",
                    update.fixture_id(),
                    update.team_id(),
                    e
                ),
            }
        }
        Ok(delivered)
    }

    /// Deliver `update` to every winning-team subscriber.
    pub fn publish_winner(&self, update: &WinningTeamUpdate) -> Result<usize> {
        let receivers = self.winner_receivers.read()?;
        let mut delivered = 0;

        for receiver in receivers.iter() {
            let event = update.clone();
            match deliver(|| receiver.receive_winner(event)) {
                Ok(()) => delivered += 1,
                Err(e) => error!(
                    "Winner subscriber failed on {}: {}",
                    update.fixture_id(),
                    e
                ),
            }
        }
        Ok(delivered)
    }
}

/// Run one subscriber callback, turning a panic into an error.
fn deliver<F: FnOnce()>(callback: F) -> Result<()> {
    catch_panic(callback).map_err(FeedError::SubscriberPanicked)
}

/// Run `callback`, returning the panic message if it unwinds.
pub(crate) fn catch_panic<T, F: FnOnce() -> T>(callback: F) -> std::result::Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(callback)).map_err(|payload| {
        payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string())
    })
}
