//! Random live score generator.
//!
//! The `ScoreGenerator` owns the authoritative live scores of every configured
//! fixture and advances them once per tick. It keeps its own copy of the fixture
//! schedule and a `HashMap<String, Vec<u32>>` of per-team scores; nothing here is
//! shared by reference with the view model, which only learns about scores through
//! the events a tick returns.
//!
//! Tick model:
//! - Fixtures are visited in configuration order, teams in list order.
//! - A fixture is skipped until its scheduled start has passed, and for good once
//!   any of its teams has reached the score limit.
//! - An eligible fixture activates with a "one in `fixture_chance`" draw; each of
//!   its teams then scores with a "one in `team_chance`" draw. A team that reaches
//!   the limit ends the fixture's turn immediately.
//! - Winning-team updates are derived from the score updates that hit the limit
//!   exactly, after the score lock has been released.

use crate::model::decision::DecisionGate;
use chrono::{DateTime, Utc};
use feed_common::{Fixture, GeneratorConfig, Result, ScoreUpdate, WinningTeamUpdate};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Mutex;

/// Generator-side view of a fixture: just what the simulation needs.
struct ScheduledFixture {
    id: String,
    team_ids: Vec<String>,
    scheduled_start: DateTime<Utc>,
}

impl ScheduledFixture {
    /// Whether the scheduled start lies strictly before `now`.
    fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_start < now
    }
}

/// Events produced by a single tick, in generation order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickBatch {
    /// Score updates, fixture by fixture, team by team.
    pub score_updates: Vec<ScoreUpdate>,
    /// One entry per fixture decided during this tick.
    pub winner_updates: Vec<WinningTeamUpdate>,
}

impl TickBatch {
    /// `true` when the tick produced nothing, which is a normal outcome.
    pub fn is_empty(&self) -> bool {
        self.score_updates.is_empty() && self.winner_updates.is_empty()
    }
}

/// Evolves synthetic scores for a fixed set of fixtures.
pub struct ScoreGenerator {
    fixtures: Vec<ScheduledFixture>,
    live_scores: Mutex<HashMap<String, Vec<u32>>>,
    config: GeneratorConfig,
    decision_gate: Box<dyn DecisionGate>,
}

impl ScoreGenerator {
    /// Create a generator for `fixtures`, kept in the given order.
    pub fn new(
        fixtures: &[Fixture],
        config: GeneratorConfig,
        decision_gate: Box<dyn DecisionGate>,
    ) -> Result<Self> {
        config.validate()?;

        let fixtures = fixtures
            .iter()
            .map(|fixture| ScheduledFixture {
                id: fixture.id.clone(),
                team_ids: fixture.teams.iter().map(|team| team.id.clone()).collect(),
                scheduled_start: fixture.scheduled_start,
            })
            .collect();

        Ok(Self {
            fixtures,
            live_scores: Mutex::new(HashMap::new()),
            config,
            decision_gate,
        })
    }

    /// Configuration the generator was built with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Advance the simulation by one tick using the current time.
    pub fn tick(&self) -> Result<TickBatch> {
        self.tick_at(Utc::now())
    }

    /// Advance the simulation by one tick as if the clock read `now`.
    ///
    /// The whole read-modify-write runs under the score lock, so two ticks never
    /// interleave on the same fixture.
    pub fn tick_at(&self, now: DateTime<Utc>) -> Result<TickBatch> {
        let limit = self.config.score_limit;

        let score_updates = {
            let mut live_scores = self.live_scores.lock()?;
            let mut updates = Vec::new();

            for fixture in &self.fixtures {
                let scores = live_scores
                    .entry(fixture.id.clone())
                    .or_insert_with(|| vec![0; fixture.team_ids.len()]);

                if !fixture.has_started(now) || is_decided(scores, limit) {
                    continue;
                }
                if !self.decision_gate.decide(self.config.fixture_chance) {
                    continue;
                }

                for (team_id, score) in fixture.team_ids.iter().zip(scores.iter_mut()) {
                    if !self.decision_gate.decide(self.config.team_chance) {
                        continue;
                    }
                    *score += 1;
                    updates.push(ScoreUpdate::new(&fixture.id, team_id, *score));

                    if *score >= limit {
                        info!("Fixture {} decided: team {} reached {}", fixture.id, team_id, limit);
                        break;
                    }
                }
            }
            updates
        };

        let winner_updates: Vec<WinningTeamUpdate> = score_updates
            .iter()
            .filter(|update| update.score() == limit)
            .map(WinningTeamUpdate::from)
            .collect();

        debug!(
            "Tick produced {} score update(s) and {} winner(s)",
            score_updates.len(),
            winner_updates.len()
        );

        Ok(TickBatch {
            score_updates,
            winner_updates,
        })
    }

    /// Current generator-side scores of a fixture, if it has been observed yet.
    pub fn scores(&self, fixture_id: &str) -> Result<Option<Vec<u32>>> {
        let live_scores = self.live_scores.lock()?;
        Ok(live_scores.get(fixture_id).cloned())
    }
}

fn is_decided(scores: &[u32], limit: u32) -> bool {
    scores.iter().any(|score| *score >= limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::decision::stub::{FixedDecisionGate, ScriptedDecisionGate};
    use chrono::Duration;
    use feed_common::{Team, Tournament};

    fn fixture(id: &str, team_ids: &[&str], scheduled_start: DateTime<Utc>) -> Fixture {
        Fixture {
            id: id.to_string(),
            title: "title".to_string(),
            tournament: Tournament {
                id: "tournament-id".to_string(),
                name: "tournament-name".to_string(),
            },
            teams: team_ids.iter().map(|id| Team::new(id, id)).collect(),
            scheduled_start,
            winning_team_id: None,
        }
    }

    fn started(id: &str, team_ids: &[&str]) -> Fixture {
        fixture(id, team_ids, Utc::now() - Duration::hours(1))
    }

    fn generator(
        fixtures: &[Fixture],
        limit: u32,
        gate: impl DecisionGate + 'static,
    ) -> ScoreGenerator {
        let config = GeneratorConfig {
            score_limit: limit,
            ..GeneratorConfig::default()
        };
        ScoreGenerator::new(fixtures, config, Box::new(gate)).unwrap()
    }

    #[test]
    fn test_scenario_until_decided() {
        let generator = generator(&[started("F1", &["T1", "T2"])], 2, FixedDecisionGate(true));

        let first = generator.tick().unwrap();
        assert_eq!(
            first.score_updates,
            vec![ScoreUpdate::new("F1", "T1", 1), ScoreUpdate::new("F1", "T2", 1)]
        );
        assert!(first.winner_updates.is_empty());

        let second = generator.tick().unwrap();
        assert_eq!(second.score_updates, vec![ScoreUpdate::new("F1", "T1", 2)]);
        assert_eq!(second.winner_updates, vec![WinningTeamUpdate::new("F1", "T1")]);

        let third = generator.tick().unwrap();
        assert!(third.is_empty());
        assert_eq!(generator.scores("F1").unwrap(), Some(vec![2, 1]));
    }

    #[test]
    fn test_team_decision_false_publishes_nothing() {
        // Fixture activates, then both team draws fail.
        let gate = ScriptedDecisionGate::new(&[true], false);
        let generator = generator(&[started("F1", &["T1", "T2"])], 3, gate);

        assert!(generator.tick().unwrap().is_empty());
    }

    #[test]
    fn test_only_first_team_scores() {
        let gate = ScriptedDecisionGate::new(&[true, true], false);
        let generator = generator(&[started("F1", &["T1", "T2"])], 3, gate);

        let batch = generator.tick().unwrap();
        assert_eq!(batch.score_updates, vec![ScoreUpdate::new("F1", "T1", 1)]);
    }

    #[test]
    fn test_fixture_decision_false_publishes_nothing() {
        let generator = generator(&[started("F1", &["T1", "T2"])], 3, FixedDecisionGate(false));

        assert!(generator.tick().unwrap().is_empty());
        // Live state is still initialized on first sight.
        assert_eq!(generator.scores("F1").unwrap(), Some(vec![0, 0]));
    }

    #[test]
    fn test_future_fixture_is_never_generated() {
        let now = Utc::now();
        let future = fixture("F1", &["T1", "T2"], now + Duration::hours(1));
        let generator = generator(&[future], 3, FixedDecisionGate(true));

        for _ in 0..5 {
            assert!(generator.tick_at(now).unwrap().is_empty());
        }
    }

    #[test]
    fn test_past_fixture_is_eligible_immediately() {
        let now = Utc::now();
        let past = fixture("F1", &["T1", "T2"], now - Duration::hours(1));
        let generator = generator(&[past], 3, FixedDecisionGate(true));

        assert_eq!(generator.tick_at(now).unwrap().score_updates.len(), 2);
    }

    #[test]
    fn test_fixture_becomes_eligible_once_started() {
        let start = Utc::now();
        let generator = generator(&[fixture("F1", &["T1"], start)], 3, FixedDecisionGate(true));

        assert!(generator.tick_at(start).unwrap().is_empty());
        assert_eq!(
            generator.tick_at(start + Duration::seconds(1)).unwrap().score_updates,
            vec![ScoreUpdate::new("F1", "T1", 1)]
        );
    }

    #[test]
    fn test_limit_one_emits_single_winner() {
        let fixtures = [started("expected-fixture-id", &["expected-team-id", "team-id-2"])];
        let generator = generator(&fixtures, 1, FixedDecisionGate(true));

        let first = generator.tick().unwrap();
        let second = generator.tick().unwrap();

        assert_eq!(first.score_updates.len(), 1);
        assert_eq!(
            first.winner_updates,
            vec![WinningTeamUpdate::new("expected-fixture-id", "expected-team-id")]
        );
        assert!(second.is_empty());
    }

    #[test]
    fn test_fixtures_processed_in_configuration_order() {
        let fixtures = [started("F2", &["B"]), started("F1", &["A"])];
        let generator = generator(&fixtures, 5, FixedDecisionGate(true));

        let batch = generator.tick().unwrap();
        let order: Vec<&str> = batch.score_updates.iter().map(|u| u.fixture_id()).collect();
        assert_eq!(order, vec!["F2", "F1"]);
    }

    #[test]
    fn test_random_run_properties() {
        use crate::model::decision::RandomDecisionGate;

        let fixtures = [started("F1", &["T1", "T2"]), started("F2", &["T3", "T4", "T5"])];
        let config = GeneratorConfig {
            score_limit: 4,
            fixture_chance: 2,
            team_chance: 2,
            ..GeneratorConfig::default()
        };
        let generator = ScoreGenerator::new(&fixtures, config, Box::new(RandomDecisionGate)).unwrap();

        let mut last: HashMap<(String, String), u32> = HashMap::new();
        let mut winners: HashMap<String, String> = HashMap::new();

        for _ in 0..500 {
            let batch = generator.tick().unwrap();
            for update in &batch.score_updates {
                assert!(
                    !winners.contains_key(update.fixture_id()),
                    "score after fixture was decided"
                );
                let key = (update.fixture_id().to_string(), update.team_id().to_string());
                let previous = last.insert(key, update.score()).unwrap_or(0);
                assert_eq!(update.score(), previous + 1);
            }
            for winner in &batch.winner_updates {
                let key = (winner.fixture_id().to_string(), winner.team_id().to_string());
                assert_eq!(last.get(&key), Some(&4));
                let first = winners.insert(winner.fixture_id().to_string(), winner.team_id().to_string());
                assert!(first.is_none(), "second winner for {}", winner.fixture_id());
            }
        }
    }

    #[test]
    fn test_concurrent_ticks_do_not_interleave() {
        use crate::model::decision::RandomDecisionGate;
        use std::sync::Arc;
        use std::thread;

        let fixtures = [
            started("F1", &["T1", "T2"]),
            started("F2", &["T3", "T4", "T5"]),
            started("F3", &["T6", "T7"]),
        ];
        let config = GeneratorConfig {
            score_limit: 3,
            fixture_chance: 2,
            team_chance: 2,
            ..GeneratorConfig::default()
        };
        let generator =
            Arc::new(ScoreGenerator::new(&fixtures, config, Box::new(RandomDecisionGate)).unwrap());

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let generator = Arc::clone(&generator);
                thread::spawn(move || {
                    (0..300)
                        .map(|_| generator.tick().unwrap())
                        .collect::<Vec<TickBatch>>()
                })
            })
            .collect();
        let batches: Vec<TickBatch> = workers
            .into_iter()
            .flat_map(|worker| worker.join().unwrap())
            .collect();

        let mut scores: HashMap<(String, String), Vec<u32>> = HashMap::new();
        let mut winners: HashMap<String, Vec<String>> = HashMap::new();
        for batch in &batches {
            for update in &batch.score_updates {
                scores
                    .entry((update.fixture_id().to_string(), update.team_id().to_string()))
                    .or_default()
                    .push(update.score());
            }
            for winner in &batch.winner_updates {
                winners
                    .entry(winner.fixture_id().to_string())
                    .or_default()
                    .push(winner.team_id().to_string());
            }
        }

        // Every team's events form 1, 2, .. n with no gaps or repeats.
        for ((fixture_id, team_id), mut values) in scores {
            values.sort_unstable();
            let expected: Vec<u32> = (1..=values.len() as u32).collect();
            assert_eq!(values, expected, "{fixture_id}/{team_id}");
        }

        assert_eq!(winners.len(), 3);
        for (fixture_id, teams) in &winners {
            assert_eq!(teams.len(), 1, "{fixture_id} decided more than once");
            let final_scores = generator.scores(fixture_id).unwrap().unwrap();
            assert_eq!(final_scores.iter().filter(|score| **score == 3).count(), 1);
            assert!(final_scores.iter().all(|score| *score <= 3));
        }
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config = GeneratorConfig {
            score_limit: 0,
            ..GeneratorConfig::default()
        };
        let result = ScoreGenerator::new(&[], config, Box::new(FixedDecisionGate(true)));
        assert!(result.is_err());
    }
}
