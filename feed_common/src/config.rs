//! Generator configuration and its defaults.

use std::time::Duration;

use crate::error::FeedError;
use crate::result::Result;

/// Default interval between generator ticks, in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 1000;
/// Default score at which a team wins its fixture.
pub const DEFAULT_SCORE_LIMIT: u32 = 10;
/// Default "one in N" chance that a live fixture activates on a tick.
pub const DEFAULT_FIXTURE_CHANCE: u32 = 3;
/// Default "one in N" chance that a team of an active fixture scores.
pub const DEFAULT_TEAM_CHANCE: u32 = 5;

/// Tuning knobs for the score generator.
///
/// Chances are "one in N": a value of 3 means roughly a third of the draws
/// succeed, 1 means always and 0 means never.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Fixed delay between two ticks.
    pub tick_interval: Duration,
    /// Score that decides a fixture. Must be at least 1.
    pub score_limit: u32,
    /// Chance that an eligible fixture activates on a tick.
    pub fixture_chance: u32,
    /// Chance that each team of an activated fixture scores.
    pub team_chance: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            score_limit: DEFAULT_SCORE_LIMIT,
            fixture_chance: DEFAULT_FIXTURE_CHANCE,
            team_chance: DEFAULT_TEAM_CHANCE,
        }
    }
}

impl GeneratorConfig {
    /// Reject values the generator cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.score_limit == 0 {
            return Err(FeedError::InvalidConfig(
                "score limit must be at least 1".to_string(),
            ));
        }
        if self.tick_interval.is_zero() {
            return Err(FeedError::InvalidConfig(
                "tick interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.score_limit, 10);
        assert_eq!(config.fixture_chance, 3);
        assert_eq!(config.team_chance, 5);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config = GeneratorConfig {
            score_limit: 0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(FeedError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = GeneratorConfig {
            tick_interval: Duration::ZERO,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
