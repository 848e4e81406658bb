//! Periodic task driving the generator and fanning its events out.
//!
//! `LiveFeed::start` spawns one background thread that waits on a
//! `crossbeam_channel::tick` timer and a stop channel with `select!`. On every
//! timer fire it runs one generator tick and delivers the batch through the
//! `Broadcaster`: all score updates first, then the winning-team updates derived
//! from them. Delivery is synchronous, so a tick's events have reached every
//! subscriber before the next tick is generated.
//!
//! Errors are logged and the loop keeps going; only a stop signal (or every stop
//! sender being dropped) ends the task.

use crate::model::broadcast::Broadcaster;
use crate::model::score_generator::{ScoreGenerator, TickBatch};
use crossbeam_channel::{Receiver, Sender, bounded, select, tick};
use feed_common::{FeedError, Result};
use log::{debug, error, info};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Running feed task.
pub struct LiveFeedHandle {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl LiveFeedHandle {
    /// A sender that stops the task when it receives `()`.
    pub fn stopper(&self) -> Sender<()> {
        self.stop_tx.clone()
    }

    /// Signal the task to stop and wait for it.
    pub fn stop(self) -> Result<()> {
        // A full channel means a stop is already pending.
        let _ = self.stop_tx.try_send(());
        self.join()
    }

    /// Wait for the task to finish without signalling it.
    pub fn join(self) -> Result<()> {
        // Keep the sender alive so a disconnected channel is not read as a stop.
        let LiveFeedHandle { stop_tx: _stop_tx, handle } = self;
        handle
            .join()
            .map_err(|_| FeedError::Format("live feed thread panicked".to_string()))
    }
}

/// Background driver for a `ScoreGenerator`.
pub struct LiveFeed;

impl LiveFeed {
    /// Spawn the periodic task with the generator's configured interval.
    pub fn start(generator: Arc<ScoreGenerator>, broadcaster: Arc<Broadcaster>) -> Result<LiveFeedHandle> {
        let interval = generator.config().tick_interval;
        Self::start_with_interval(generator, broadcaster, interval)
    }

    /// Spawn the periodic task firing every `interval`. A zero interval is rejected.
    pub fn start_with_interval(
        generator: Arc<ScoreGenerator>,
        broadcaster: Arc<Broadcaster>,
        interval: Duration,
    ) -> Result<LiveFeedHandle> {
        if interval.is_zero() {
            return Err(FeedError::InvalidConfig(
                "live feed interval must be greater than zero".to_string(),
            ));
        }
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let handle = thread::spawn(move || {
            info!(
                "Live feed started (Thread ID: {:?}, interval: {:?})",
                thread::current().id(),
                interval
            );
            run(&generator, &broadcaster, interval, stop_rx);
            info!("Live feed stopped");
        });

        Ok(LiveFeedHandle { stop_tx, handle })
    }

    /// Generate one tick and deliver it. Returns the delivered batch.
    pub fn run_tick(generator: &ScoreGenerator, broadcaster: &Broadcaster) -> Result<TickBatch> {
        let batch = generator.tick()?;
        publish_batch(broadcaster, &batch);
        Ok(batch)
    }
}

fn run(generator: &ScoreGenerator, broadcaster: &Broadcaster, interval: Duration, stop_rx: Receiver<()>) {
    let ticker = tick(interval);

    loop {
        select! {
            recv(stop_rx) -> _ => break,
            recv(ticker) -> _ => {
                if let Err(e) = LiveFeed::run_tick(generator, broadcaster) {
                    error!("Live feed tick failed: {}", e);
                }
            }
        }
    }
}

fn publish_batch(broadcaster: &Broadcaster, batch: &TickBatch) {
    for update in &batch.score_updates {
        match broadcaster.publish_score(update) {
            Ok(delivered) => debug!(
                "Score {}/{}={} delivered to {} subscriber(s)",
                update.fixture_id(),
                update.team_id(),
                update.score(),
                delivered
            ),
            Err(e) => error!("Failed to publish score update: {}", e),
        }
    }
    for update in &batch.winner_updates {
        if let Err(e) = broadcaster.publish_winner(update) {
            error!("Failed to publish winning team update: {}", e);
        }
    }
}
