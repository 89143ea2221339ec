//! Position ranking rule and the defensive rank selector

use crate::{
    error::{FfaError, Result},
    storage::{PlayerGameRow, Stat, StatLine},
    GameId, PlayerId, Position, TeamId,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Sort keys deciding the best performer of a position in one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingRule {
    pub primary: Stat,
    pub secondary: Stat,
}

impl RankingRule {
    /// Best performance first: both keys descending, then lowest player ID.
    pub fn compare(&self, a: &PlayerGameRow, b: &PlayerGameRow) -> Ordering {
        b.stats
            .get(self.primary)
            .total_cmp(&a.stats.get(self.primary))
            .then_with(|| {
                b.stats
                    .get(self.secondary)
                    .total_cmp(&a.stats.get(self.secondary))
            })
            .then_with(|| a.player_id.cmp(&b.player_id))
    }
}

pub fn ranking_rule(position: Position) -> Result<RankingRule> {
    match position {
        Position::QB => Ok(RankingRule {
            primary: Stat::PassYards,
            secondary: Stat::PassAttempts,
        }),
        Position::RB => Ok(RankingRule {
            primary: Stat::RushYards,
            secondary: Stat::RushAttempts,
        }),
        Position::WR | Position::TE => Ok(RankingRule {
            primary: Stat::RecYards,
            secondary: Stat::Receptions,
        }),
        Position::K | Position::DEF => Err(FfaError::UnsupportedPosition { position }),
    }
}

/// Whether a position group produced anything countable in a game.
///
/// QB: passing yards. Everyone else: rushing plus receiving yards.
pub fn selection_metric(position: Position, stats: &StatLine) -> Result<f64> {
    match position {
        Position::QB => Ok(stats.pass_yards),
        Position::RB | Position::WR | Position::TE => Ok(stats.rush_yards + stats.rec_yards),
        Position::K | Position::DEF => Err(FfaError::UnsupportedPosition { position }),
    }
}

/// The top row under `rule`, if any.
pub fn best_performance<'r, I>(rows: I, rule: &RankingRule) -> Option<&'r PlayerGameRow>
where
    I: IntoIterator<Item = &'r PlayerGameRow>,
{
    rows.into_iter().min_by(|a, b| rule.compare(a, b))
}

/// A stat line together with the team its player was rostered on that day.
#[derive(Debug, Clone, PartialEq)]
pub struct SidedRow {
    pub row: PlayerGameRow,
    pub team: TeamId,
}

impl SidedRow {
    /// The team this player lined up against
    pub fn defending_team(&self) -> Option<TeamId> {
        self.row.opponent_of(self.team)
    }
}

/// One training target: the best performer facing `defense_team` in a game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledRow {
    pub player_id: PlayerId,
    pub game_id: GameId,
    pub date: NaiveDate,
    pub offense_team: TeamId,
    pub defense_team: TeamId,
    pub stats: StatLine,
}

/// Picks one representative per (game, defending team).
///
/// Candidates are grouped by the side they played on; the group's top row
/// under the position's ranking rule becomes the label. Groups where nobody
/// recorded a countable stat are left out. Output is ordered by date, game
/// and defending team, so repeated runs agree.
pub fn select_representatives(candidates: &[SidedRow], position: Position) -> Result<Vec<LabeledRow>> {
    let rule = ranking_rule(position)?;

    let mut groups: BTreeMap<(NaiveDate, GameId, TeamId), Vec<&SidedRow>> = BTreeMap::new();
    for candidate in candidates {
        if candidate.row.position != position {
            continue;
        }
        let Some(defense_team) = candidate.defending_team() else {
            continue;
        };
        groups
            .entry((candidate.row.date, candidate.row.game_id, defense_team))
            .or_default()
            .push(candidate);
    }

    let mut labeled = Vec::with_capacity(groups.len());
    for ((date, game_id, defense_team), group) in groups {
        let mut countable = false;
        for candidate in &group {
            if selection_metric(position, &candidate.row.stats)? > 0.0 {
                countable = true;
                break;
            }
        }
        if !countable {
            debug!(%game_id, %defense_team, "no countable {} stats, skipping", position);
            continue;
        }

        let best = group
            .iter()
            .min_by(|a, b| rule.compare(&a.row, &b.row))
            .map(|candidate| (candidate.row.clone(), candidate.team));

        if let Some((row, offense_team)) = best {
            labeled.push(LabeledRow {
                player_id: row.player_id,
                game_id,
                date,
                offense_team,
                defense_team,
                stats: row.stats,
            });
        }
    }

    Ok(labeled)
}
