//! Command-line arguments for the live feed server.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use feed_common::GeneratorConfig;
use feed_common::config::{
    DEFAULT_FIXTURE_CHANCE, DEFAULT_SCORE_LIMIT, DEFAULT_TEAM_CHANCE, DEFAULT_TICK_MS,
};
use std::time::Duration;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Milliseconds between two generator ticks.
    #[clap(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Score at which a team wins its fixture.
    #[clap(long, default_value_t = DEFAULT_SCORE_LIMIT)]
    pub score_limit: u32,

    /// "One in N" chance that a live fixture activates on a tick (0 = never).
    #[clap(long, default_value_t = DEFAULT_FIXTURE_CHANCE)]
    pub fixture_chance: u32,

    /// "One in N" chance that a team of an active fixture scores (0 = never).
    #[clap(long, default_value_t = DEFAULT_TEAM_CHANCE)]
    pub team_chance: u32,

    /// Path to a JSON file with fixture seeds. The built-in demo set is used when absent.
    #[clap(long)]
    pub fixtures: Option<String>,
}

impl Args {
    /// Generator configuration described by the arguments. Not yet validated.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            tick_interval: Duration::from_millis(self.tick_ms),
            score_limit: self.score_limit,
            fixture_chance: self.fixture_chance,
            team_chance: self.team_chance,
        }
    }
}
