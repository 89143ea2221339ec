//! Roster-aware historical feature construction
//!
//! Builds point-in-time-correct training data for one position:
//! - `roster`: which team a player belonged to on a given date
//! - `window`: the most recent N performances before a date, for a player or
//!   against a defense
//! - `ranking`: per-position ranking rule and the defensive rank selector
//! - `aggregate`: rolling averages and named feature vectors
//! - `dataset`: the training dataset builder and prediction-time features
//!
//! Every call takes an explicit database handle (through `RosterResolver`);
//! nothing here writes to the store.

pub mod aggregate;
pub mod dataset;
pub mod ranking;
pub mod roster;
pub mod window;


pub use aggregate::{rolling_average, FeatureSide, FeatureVector, StatAverages};
pub use dataset::{
    build_training_dataset, expected_feature_columns, query_features, DatasetSummary,
    TrainingRow, TrainingSet,
};
pub use ranking::{
    best_performance, ranking_rule, select_representatives, selection_metric, LabeledRow,
    RankingRule, SidedRow,
};
pub use roster::RosterResolver;
pub use window::{recent_defense_games, recent_player_games};

use crate::{
    error::{FfaError, Result},
    storage::Stat,
    Position,
};

/// Number of prior games averaged for both player and defense features.
pub const DEFAULT_WINDOW: usize = 8;

pub const DEFAULT_SEED: u64 = 42;

const SKILL_STATS: [Stat; 7] = [
    Stat::RushAttempts,
    Stat::RushYards,
    Stat::RushTds,
    Stat::Targets,
    Stat::Receptions,
    Stat::RecYards,
    Stat::RecTds,
];

const QUARTERBACK_STATS: [Stat; 8] = [
    Stat::RushAttempts,
    Stat::RushYards,
    Stat::RushTds,
    Stat::PassAttempts,
    Stat::PassCompletions,
    Stat::PassYards,
    Stat::PassTds,
    Stat::PassInt,
];

/// Tunables shared by dataset construction and training
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Games per rolling window
    pub window: usize,
    /// Share of rows used for fitting; the rest is held out for MSE
    pub train_ratio: f64,
    /// Seed for the train/test shuffle
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            train_ratio: 0.8,
            seed: DEFAULT_SEED,
        }
    }
}

/// Stats averaged into player and defense features for `position`.
pub fn feature_stats(position: Position) -> Result<&'static [Stat]> {
    match position {
        Position::QB => Ok(&QUARTERBACK_STATS),
        Position::RB | Position::WR | Position::TE => Ok(&SKILL_STATS),
        Position::K | Position::DEF => Err(FfaError::UnsupportedPosition { position }),
    }
}

/// Stats predicted for `position`. Same families as the features.
pub fn target_stats(position: Position) -> Result<&'static [Stat]> {
    feature_stats(position)
}
