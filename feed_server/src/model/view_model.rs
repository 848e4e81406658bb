//! Sorted, query-optimized projection of the live fixtures.
//!
//! The `ViewModel` is created once from the static fixture source, sorted once by
//! fixture id (and each fixture's teams by team id), and then only mutated in
//! place. Lookups are binary searches over those sorted vectors: locate the first
//! element whose id is not less than the target, then require an exact match.
//! Lookups do not check the sort precondition.

use feed_common::{Fixture, Team};
use serde::Serialize;

/// All fixtures as served to readers. Serializes as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViewModel {
    fixtures: Vec<Fixture>,
}

impl ViewModel {
    /// Wrap `fixtures` as-is. Call [`Self::sort`] before any lookup.
    pub fn new(fixtures: Vec<Fixture>) -> Self {
        ViewModel { fixtures }
    }

    /// Fixtures in their current order.
    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// Sort fixtures by id and every fixture's teams by id.
    pub fn sort(&mut self) {
        self.fixtures.sort_by(|a, b| a.id.cmp(&b.id));
        for fixture in &mut self.fixtures {
            sort_teams(fixture);
        }
    }

    /// Binary search for a fixture.
    pub fn find_fixture(&self, fixture_id: &str) -> Option<&Fixture> {
        search_by_id(&self.fixtures, fixture_id, |f| &f.id).map(|i| &self.fixtures[i])
    }

    /// Mutable variant of [`Self::find_fixture`].
    pub fn find_fixture_mut(&mut self, fixture_id: &str) -> Option<&mut Fixture> {
        let index = search_by_id(&self.fixtures, fixture_id, |f| &f.id)?;
        Some(&mut self.fixtures[index])
    }

    /// Binary search for a team inside a fixture.
    pub fn find_fixture_team(&self, fixture_id: &str, team_id: &str) -> Option<&Team> {
        let fixture = self.find_fixture(fixture_id)?;
        search_by_id(&fixture.teams, team_id, |t| &t.id).map(|i| &fixture.teams[i])
    }

    /// Mutable variant of [`Self::find_fixture_team`].
    pub fn find_fixture_team_mut(&mut self, fixture_id: &str, team_id: &str) -> Option<&mut Team> {
        let fixture = self.find_fixture_mut(fixture_id)?;
        let index = search_by_id(&fixture.teams, team_id, |t| &t.id)?;
        Some(&mut fixture.teams[index])
    }
}

fn sort_teams(fixture: &mut Fixture) {
    fixture.teams.sort_by(|a, b| a.id.cmp(&b.id));
}

fn search_by_id<T>(items: &[T], id: &str, key: impl Fn(&T) -> &String) -> Option<usize> {
    let index = items.partition_point(|item| key(item).as_str() < id);
    match items.get(index) {
        Some(item) if key(item) == id => Some(index),
        _ => None,
    }
}
