//! Roster resolution: which team a player was on for a given date

use crate::{
    error::{FfaError, Result},
    storage::LeagueDatabase,
    PlayerId, TeamId,
};
use chrono::NaiveDate;
use lru::LruCache;
use std::num::NonZeroUsize;

const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Resolves roster membership against the `player_teams` intervals.
///
/// Lookups, including misses, are memoised for the lifetime of the resolver.
/// The dataset builder asks the same (player, date) question repeatedly while
/// assembling defense windows, so the cache saves most round-trips.
pub struct RosterResolver<'a> {
    db: &'a LeagueDatabase,
    cache: LruCache<(PlayerId, NaiveDate), Option<TeamId>>,
}

impl<'a> RosterResolver<'a> {
    pub fn new(db: &'a LeagueDatabase) -> Self {
        Self::with_capacity(db, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(db: &'a LeagueDatabase, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            db,
            cache: LruCache::new(capacity),
        }
    }

    /// The underlying store
    pub fn db(&self) -> &'a LeagueDatabase {
        self.db
    }

    /// Team `player_id` belonged to on `date`.
    ///
    /// Fails with `RosterGap` when no interval covers the date.
    pub fn team_on_date(&mut self, player_id: PlayerId, date: NaiveDate) -> Result<TeamId> {
        let key = (player_id, date);
        let team = match self.cache.get(&key) {
            Some(cached) => *cached,
            None => {
                let team = self
                    .db
                    .query_roster_interval(player_id, date)?
                    .map(|interval| interval.team_id);
                self.cache.put(key, team);
                team
            }
        };

        team.ok_or(FfaError::RosterGap { player_id, date })
    }

    /// Number of memoised lookups, for diagnostics
    pub fn cached_lookups(&self) -> usize {
        self.cache.len()
    }
}
