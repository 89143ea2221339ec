//! Rolling averages and named feature vectors

use crate::storage::{PlayerGameRow, Stat, StatLine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean per stat; NaN marks "no history".
pub type StatAverages = BTreeMap<Stat, f64>;

/// Mean of each stat over the last `window` entries of `games`.
///
/// Pass games in chronological order so the last entries are the most
/// recent. Fewer entries than `window` are averaged as-is; an empty slice
/// (or a zero window) yields NaN for every stat.
pub fn rolling_average(games: &[StatLine], stats: &[Stat], window: usize) -> StatAverages {
    let recent = &games[games.len().saturating_sub(window)..];

    stats
        .iter()
        .map(|&stat| {
            let mean = if recent.is_empty() {
                f64::NAN
            } else {
                recent.iter().map(|game| game.get(stat)).sum::<f64>() / recent.len() as f64
            };
            (stat, mean)
        })
        .collect()
}

/// Stat lines of a most-recent-first window, oldest first.
pub fn chronological_lines(window: &[PlayerGameRow]) -> Vec<StatLine> {
    window.iter().rev().map(|row| row.stats).collect()
}

/// Which namespace a feature column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureSide {
    Player,
    Defense,
}

impl FeatureSide {
    pub const BOTH: [FeatureSide; 2] = [FeatureSide::Player, FeatureSide::Defense];

    pub fn prefix(&self) -> &'static str {
        match self {
            FeatureSide::Player => "player",
            FeatureSide::Defense => "defense",
        }
    }

    /// e.g. `player_rush_yards`, `defense_rec_yards`
    pub fn column(&self, stat: Stat) -> String {
        format!("{}_{}", self.prefix(), stat.name())
    }
}

/// Named feature columns for one training row or one prediction query.
///
/// Averages that came out NaN are not stored, so a missing column is how
/// insufficient history shows up downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    columns: BTreeMap<String, f64>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_averages(side: FeatureSide, averages: &StatAverages) -> Self {
        let columns = averages
            .iter()
            .filter(|(_, value)| !value.is_nan())
            .map(|(stat, value)| (side.column(*stat), *value))
            .collect();
        Self { columns }
    }

    /// Combine two vectors; columns in `other` win on collision.
    pub fn merged(mut self, other: FeatureVector) -> Self {
        self.columns.extend(other.columns);
        self
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns.get(column).copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), *value))
    }
}
