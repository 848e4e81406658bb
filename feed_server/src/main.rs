//! Live score feed server binary.
//!
//! Wires the feed together and runs it until Ctrl+C:
//!
//! - loads the fixture seeds (built-in demo set or `--fixtures <file>`) and anchors
//!   their start offsets at the current time;
//! - builds the `LiveDataServer` projection, registers it with the `Broadcaster`
//!   for both event kinds and publishes the initial snapshot;
//! - starts the `LiveFeed` background task driving a `ScoreGenerator` with a random
//!   decision gate;
//! - on Ctrl+C, stops the task, waits for it and logs the final standings.
//!
//! Any error while loading configuration or fixtures aborts startup.
use chrono::Utc;
use clap::Parser;
use feed_common::seed::{FixtureSeed, build_fixtures, default_seeds, parse_seeds};
use feed_common::{FeedError, Result};
use feed_server::args::Args;
use feed_server::model::broadcast::{Broadcaster, ScoreUpdateReceiver, WinningTeamUpdateReceiver};
use feed_server::model::decision::RandomDecisionGate;
use feed_server::model::live_data::LiveDataServer;
use feed_server::model::live_feed::LiveFeed;
use feed_server::model::publisher::LogSnapshotPublisher;
use feed_server::model::score_generator::ScoreGenerator;
use feed_server::model::view_model::ViewModel;
use log::{error, info};
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let config = args.generator_config();
    config.validate()?;

    let seeds = load_seeds(args.fixtures.as_deref())?;
    let fixtures = build_fixtures(Utc::now(), &seeds)?;
    info!("Loaded {} fixtures", fixtures.len());

    let live_data = Arc::new(LiveDataServer::new(
        ViewModel::new(fixtures.clone()),
        Box::new(LogSnapshotPublisher),
    ));
    let broadcaster = Arc::new(Broadcaster::new());
    broadcaster.register_score_receivers([Arc::clone(&live_data) as Arc<dyn ScoreUpdateReceiver>])?;
    broadcaster
        .register_winner_receivers([Arc::clone(&live_data) as Arc<dyn WinningTeamUpdateReceiver>])?;

    if let Err(e) = live_data.publish_snapshot() {
        error!("Initial view model publish failed: {}", e);
    }

    let generator = Arc::new(ScoreGenerator::new(
        &fixtures,
        config,
        Box::new(RandomDecisionGate),
    )?);
    let feed = LiveFeed::start(generator, broadcaster)?;

    let stopper = feed.stopper();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down...");
        let _ = stopper.try_send(());
    }) {
        feed.stop()?;
        return Err(FeedError::Format(format!("Error setting Ctrl+C handler: {}", e)));
    }

    info!("service started");
    feed.join()?;
    info!("service stopping...");

    for fixture in live_data.snapshot()?.fixtures() {
        let scores: Vec<String> = fixture
            .teams
            .iter()
            .map(|team| format!("{}={}", team.name, team.score))
            .collect();
        info!("{} [{}] {}", fixture.id, fixture.state(), scores.join(", "));
    }
    Ok(())
}

/// Read seeds from `path`, or fall back to the built-in demo set.
fn load_seeds(path: Option<&str>) -> Result<Vec<FixtureSeed>> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            parse_seeds(BufReader::new(file))
        }
        None => Ok(default_seeds()),
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
