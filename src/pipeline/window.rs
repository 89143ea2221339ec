//! Performance windows: the most recent N games strictly before a date

use super::{
    ranking::{best_performance, ranking_rule},
    roster::RosterResolver,
};
use crate::{
    error::{FfaError, Result},
    storage::{GameOrder, LeagueDatabase, PlayerGameRow},
    PlayerId, Position, TeamId,
};
use chrono::NaiveDate;
use tracing::debug;

/// Up to `n` of the player's games dated strictly before `before_date`,
/// most recent first.
pub fn recent_player_games(
    db: &LeagueDatabase,
    player_id: PlayerId,
    before_date: NaiveDate,
    n: usize,
) -> Result<Vec<PlayerGameRow>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let rows = db.query_player_games(
        player_id,
        Some(before_date),
        GameOrder::MostRecentFirst,
        Some(n),
    )?;
    Ok(rows)
}

/// Up to `n` representative `position` performances against `team_id`,
/// strictly before `before_date`, most recent first.
///
/// Each game contributes at most one row: the best performer (by the
/// position's ranking rule) among players rostered on the other side. The
/// date cut is applied in the query, before the window is truncated.
pub fn recent_defense_games(
    resolver: &mut RosterResolver<'_>,
    team_id: TeamId,
    position: Position,
    before_date: NaiveDate,
    n: usize,
) -> Result<Vec<PlayerGameRow>> {
    let rule = ranking_rule(position)?;
    if n == 0 {
        return Ok(Vec::new());
    }

    let rows = resolver
        .db()
        .query_position_games_involving_team(team_id, position, before_date)?;

    let mut representatives: Vec<PlayerGameRow> = Vec::with_capacity(n);
    let mut start = 0;
    while start < rows.len() && representatives.len() < n {
        // Rows arrive grouped by game
        let game_id = rows[start].game_id;
        let end = rows[start..]
            .iter()
            .position(|row| row.game_id != game_id)
            .map_or(rows.len(), |offset| start + offset);

        let mut facing: Vec<&PlayerGameRow> = Vec::new();
        for row in &rows[start..end] {
            match resolver.team_on_date(row.player_id, row.date) {
                Ok(team) if row.opponent_of(team) == Some(team_id) => facing.push(row),
                Ok(_) => {}
                Err(FfaError::RosterGap { player_id, date }) => {
                    debug!(%player_id, %date, %game_id, "roster gap, left out of defense window");
                }
                Err(e) => return Err(e),
            }
        }

        if let Some(best) = best_performance(facing, &rule) {
            representatives.push(best.clone());
        }
        start = end;
    }

    Ok(representatives)
}
