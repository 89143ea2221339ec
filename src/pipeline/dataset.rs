//! Training dataset builder and prediction-time feature vectors

use super::{
    aggregate::{chronological_lines, rolling_average, FeatureSide, FeatureVector},
    feature_stats,
    ranking::{select_representatives, SidedRow},
    roster::RosterResolver,
    target_stats,
    window::{recent_defense_games, recent_player_games},
    PipelineConfig,
};
use crate::{
    error::{FfaError, Result},
    storage::{Player, Stat},
    GameId, PlayerId, Position, TeamId,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// One labeled example: the features known before the game and what happened in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingRow {
    pub player_id: PlayerId,
    pub game_id: GameId,
    pub date: NaiveDate,
    pub defense_team: TeamId,
    pub features: FeatureVector,
    pub targets: BTreeMap<Stat, f64>,
}

/// Where candidate stat lines went while the dataset was built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    /// Dated stat lines for the position
    pub candidates: usize,
    /// Skipped: no roster interval covered the game date
    pub roster_gaps: usize,
    /// Skipped: the rostered team did not play in the game
    pub roster_mismatches: usize,
    /// One per (game, defending team) after rank selection
    pub labeled: usize,
    /// Dropped: a player or defense window came back empty
    pub insufficient_history: usize,
    /// Rows in the final table
    pub rows: usize,
}

/// Tabular training data for one position.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSet {
    pub position: Position,
    pub feature_columns: Vec<String>,
    pub target_stats: Vec<Stat>,
    pub rows: Vec<TrainingRow>,
    pub summary: DatasetSummary,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// `player_<stat>` then `defense_<stat>` for every feature stat of `position`.
pub fn expected_feature_columns(position: Position) -> Result<Vec<String>> {
    let stats = feature_stats(position)?;
    Ok(FeatureSide::BOTH
        .iter()
        .flat_map(|side| stats.iter().map(move |stat| side.column(*stat)))
        .collect())
}

/// Player and defense averages as of `date` (exclusive).
fn features_before(
    resolver: &mut RosterResolver<'_>,
    player_id: PlayerId,
    defense_team: TeamId,
    position: Position,
    date: NaiveDate,
    window: usize,
) -> Result<FeatureVector> {
    let stats = feature_stats(position)?;

    let player_window = recent_player_games(resolver.db(), player_id, date, window)?;
    let player_averages = rolling_average(&chronological_lines(&player_window), stats, window);

    let defense_window = recent_defense_games(resolver, defense_team, position, date, window)?;
    let defense_averages = rolling_average(&chronological_lines(&defense_window), stats, window);

    debug!(
        %player_id,
        %defense_team,
        %date,
        player_games = player_window.len(),
        defense_games = defense_window.len(),
        "built feature windows"
    );

    Ok(FeatureVector::from_averages(FeatureSide::Player, &player_averages)
        .merged(FeatureVector::from_averages(FeatureSide::Defense, &defense_averages)))
}

/// Builds the training table for `position`.
///
/// Only games dated strictly before `before` are labeled when it is given.
/// Stat lines with roster problems and rows lacking history are skipped and
/// counted in the summary rather than failing the build.
pub fn build_training_dataset(
    resolver: &mut RosterResolver<'_>,
    position: Position,
    before: Option<NaiveDate>,
    config: &PipelineConfig,
) -> Result<TrainingSet> {
    let feature_columns = expected_feature_columns(position)?;
    let targets = target_stats(position)?;
    let mut summary = DatasetSummary::default();

    let candidates = resolver.db().query_position_games(position, before)?;
    summary.candidates = candidates.len();

    let mut sided = Vec::with_capacity(candidates.len());
    for row in candidates {
        match resolver.team_on_date(row.player_id, row.date) {
            Ok(team) if row.opponent_of(team).is_some() => sided.push(SidedRow { row, team }),
            Ok(team) => {
                warn!(
                    player_id = %row.player_id,
                    game_id = %row.game_id,
                    %team,
                    "rostered team did not play in this game, skipping stat line"
                );
                summary.roster_mismatches += 1;
            }
            Err(FfaError::RosterGap { player_id, date }) => {
                warn!(
                    %player_id,
                    %date,
                    game_id = %row.game_id,
                    "no roster interval covers game date, skipping stat line"
                );
                summary.roster_gaps += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let labeled = select_representatives(&sided, position)?;
    summary.labeled = labeled.len();

    let mut rows = Vec::with_capacity(labeled.len());
    for label in labeled {
        let features = features_before(
            resolver,
            label.player_id,
            label.defense_team,
            position,
            label.date,
            config.window,
        )?;

        if let Some(missing) = feature_columns.iter().find(|column| !features.contains(column)) {
            debug!(
                player_id = %label.player_id,
                game_id = %label.game_id,
                column = %missing,
                "insufficient history, dropping row"
            );
            summary.insufficient_history += 1;
            continue;
        }

        rows.push(TrainingRow {
            player_id: label.player_id,
            game_id: label.game_id,
            date: label.date,
            defense_team: label.defense_team,
            features,
            targets: targets
                .iter()
                .map(|stat| (*stat, label.stats.get(*stat)))
                .collect(),
        });
    }
    summary.rows = rows.len();

    info!(
        %position,
        candidates = summary.candidates,
        roster_gaps = summary.roster_gaps,
        labeled = summary.labeled,
        dropped = summary.insufficient_history,
        rows = summary.rows,
        "built training dataset"
    );

    Ok(TrainingSet {
        position,
        feature_columns,
        target_stats: targets.to_vec(),
        rows,
        summary,
    })
}

/// Feature vector for a fresh `player` vs `opponent` matchup as of `as_of`.
///
/// Windows end strictly before `as_of`. Columns with no history are absent;
/// the predictor reports them as `MissingFeature`.
pub fn query_features(
    resolver: &mut RosterResolver<'_>,
    player: &Player,
    opponent: TeamId,
    as_of: NaiveDate,
    window: usize,
) -> Result<FeatureVector> {
    features_before(
        resolver,
        player.player_id,
        opponent,
        player.position,
        as_of,
        window,
    )
}
