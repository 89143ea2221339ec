//! Basic database query operations

use super::{models::*, schema::LeagueDatabase};
use crate::cli::types::{GameId, PlayerId, Position, TeamId};
use crate::error::FfaError;
use anyhow::{bail, Result};
use chrono::NaiveDate;
use rusqlite::{params, types::Type, OptionalExtension, Row};

/// Joined columns read by `row_to_player_game_row`, stats in `Stat::ALL` order.
fn player_game_columns() -> String {
    let stats: Vec<String> = Stat::ALL
        .iter()
        .map(|stat| format!("pg.{}", stat.name()))
        .collect();
    format!(
        "pg.player_id, pg.game_id, p.position, g.date, g.home_team_id, g.away_team_id, {}",
        stats.join(", ")
    )
}

const PLAYER_GAME_JOINS: &str = "FROM player_games pg
     JOIN players p ON p.player_id = pg.player_id
     JOIN games g ON g.game_id = pg.game_id";

const GAME_COLUMNS: &str =
    "game_id, home_team_id, away_team_id, date, home_score, away_score, spread";

impl LeagueDatabase {
    /// Insert or update a team
    pub fn upsert_team(&mut self, team: &Team) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO teams (team_id, code, name, division)
             VALUES (?, ?, ?, ?)",
            params![team.team_id.as_u32(), team.code, team.name, team.division],
        )?;
        Ok(())
    }

    /// Insert or update a player's basic information
    pub fn upsert_player(&mut self, player: &Player) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO players (player_id, name, position)
             VALUES (?, ?, ?)",
            params![
                player.player_id.as_u64(),
                player.name,
                player.position.to_string()
            ],
        )?;
        Ok(())
    }

    /// Insert or update a game
    pub fn upsert_game(&mut self, game: &Game) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO games
             (game_id, home_team_id, away_team_id, date, home_score, away_score, spread)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                game.game_id.as_u64(),
                game.home_team.as_u32(),
                game.away_team.as_u32(),
                game.date,
                game.home_score,
                game.away_score,
                game.spread
            ],
        )?;
        Ok(())
    }

    /// Insert or replace the stat line for a (player, game) pair
    pub fn upsert_player_game(&mut self, player_game: &PlayerGame) -> Result<()> {
        let s = &player_game.stats;
        self.conn.execute(
            "INSERT OR REPLACE INTO player_games
             (player_id, game_id,
              pass_attempts, pass_completions, pass_yards, pass_tds, pass_int,
              rush_attempts, rush_yards, rush_tds,
              targets, receptions, rec_yards, rec_tds)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                player_game.player_id.as_u64(),
                player_game.game_id.as_u64(),
                s.pass_attempts,
                s.pass_completions,
                s.pass_yards,
                s.pass_tds,
                s.pass_int,
                s.rush_attempts,
                s.rush_yards,
                s.rush_tds,
                s.targets,
                s.receptions,
                s.rec_yards,
                s.rec_tds
            ],
        )?;
        Ok(())
    }

    /// Add a roster interval, rejecting any overlap with the player's existing ones
    pub fn insert_roster_interval(&mut self, interval: &PlayerTeam) -> Result<()> {
        if let Some(end) = interval.end_date {
            if end < interval.start_date {
                bail!(
                    "roster interval for player {} ends ({}) before it starts ({})",
                    interval.player_id,
                    end,
                    interval.start_date
                );
            }
        }

        if let Some(existing) = self
            .roster_intervals(interval.player_id)?
            .into_iter()
            .find(|existing| existing.overlaps(interval))
        {
            return Err(FfaError::RosterOverlap {
                player_id: interval.player_id,
                date: existing.start_date.max(interval.start_date),
            }
            .into());
        }

        self.conn.execute(
            "INSERT INTO player_teams (player_id, team_id, start_date, end_date)
             VALUES (?, ?, ?, ?)",
            params![
                interval.player_id.as_u64(),
                interval.team_id.as_u32(),
                interval.start_date,
                interval.end_date
            ],
        )?;
        Ok(())
    }

    /// End the player's open roster interval on `end_date`.
    /// Returns false when the player has no open interval starting on or before that date.
    pub fn close_roster_interval(&mut self, player_id: PlayerId, end_date: NaiveDate) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE player_teams SET end_date = ?
             WHERE player_id = ? AND end_date IS NULL AND start_date <= ?",
            params![end_date, player_id.as_u64(), end_date],
        )?;
        Ok(rows_affected > 0)
    }

    /// All roster intervals for a player, earliest first
    pub fn roster_intervals(&self, player_id: PlayerId) -> Result<Vec<PlayerTeam>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, team_id, start_date, end_date
             FROM player_teams
             WHERE player_id = ?
             ORDER BY start_date",
        )?;

        let intervals = stmt
            .query_map(params![player_id.as_u64()], Self::row_to_player_team)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(intervals)
    }

    pub fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>> {
        let player = self
            .conn
            .query_row(
                "SELECT player_id, name, position FROM players WHERE player_id = ?",
                params![player_id.as_u64()],
                Self::row_to_player,
            )
            .optional()?;
        Ok(player)
    }

    /// Look up a player by display name, ignoring ASCII case
    pub fn find_player_by_name(&self, name: &str) -> Result<Option<Player>> {
        let player = self
            .conn
            .query_row(
                "SELECT player_id, name, position FROM players
                 WHERE LOWER(name) = LOWER(?)
                 ORDER BY player_id
                 LIMIT 1",
                params![name.trim()],
                Self::row_to_player,
            )
            .optional()?;
        Ok(player)
    }

    pub fn get_team(&self, team_id: TeamId) -> Result<Option<Team>> {
        let team = self
            .conn
            .query_row(
                "SELECT team_id, code, name, division FROM teams WHERE team_id = ?",
                params![team_id.as_u32()],
                Self::row_to_team,
            )
            .optional()?;
        Ok(team)
    }

    /// Look up a team by its abbreviation, ignoring case
    pub fn find_team_by_code(&self, code: &str) -> Result<Option<Team>> {
        let team = self
            .conn
            .query_row(
                "SELECT team_id, code, name, division FROM teams WHERE UPPER(code) = UPPER(?)",
                params![code.trim()],
                Self::row_to_team,
            )
            .optional()?;
        Ok(team)
    }

    pub fn get_game(&self, game_id: GameId) -> Result<Option<Game>> {
        let query = format!("SELECT {} FROM games WHERE game_id = ?", GAME_COLUMNS);
        let game = self
            .conn
            .query_row(&query, params![game_id.as_u64()], Self::row_to_game)
            .optional()?;
        Ok(game)
    }

    /// Dated games a team played in, chronological
    pub fn query_games_involving_team(&self, team_id: TeamId) -> Result<Vec<Game>> {
        let query = format!(
            "SELECT {} FROM games
             WHERE (home_team_id = ?1 OR away_team_id = ?1) AND date IS NOT NULL
             ORDER BY date, game_id",
            GAME_COLUMNS
        );
        let mut stmt = self.conn.prepare(&query)?;
        let games = stmt
            .query_map(params![team_id.as_u32()], Self::row_to_game)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(games)
    }

    /// Stat lines for one player in dated games, optionally strictly before `before`
    pub fn query_player_games(
        &self,
        player_id: PlayerId,
        before: Option<NaiveDate>,
        order: GameOrder,
        limit: Option<usize>,
    ) -> Result<Vec<PlayerGameRow>> {
        let mut query = format!(
            "SELECT {} {} WHERE pg.player_id = ? AND g.date IS NOT NULL",
            player_game_columns(),
            PLAYER_GAME_JOINS
        );

        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(player_id.as_u64())];

        if let Some(date) = before {
            query.push_str(" AND g.date < ?");
            params.push(Box::new(date));
        }

        query.push_str(match order {
            GameOrder::MostRecentFirst => " ORDER BY g.date DESC, pg.game_id DESC",
            GameOrder::Chronological => " ORDER BY g.date, pg.game_id",
        });

        if let Some(l) = limit {
            query.push_str(" LIMIT ?");
            params.push(Box::new(l));
        }

        self.query_player_game_rows(&query, params)
    }

    /// Every dated stat line for players of `position`, chronological
    pub fn query_position_games(
        &self,
        position: Position,
        before: Option<NaiveDate>,
    ) -> Result<Vec<PlayerGameRow>> {
        let mut query = format!(
            "SELECT {} {} WHERE p.position = ? AND g.date IS NOT NULL",
            player_game_columns(),
            PLAYER_GAME_JOINS
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(position.to_string())];

        if let Some(date) = before {
            query.push_str(" AND g.date < ?");
            params.push(Box::new(date));
        }
        query.push_str(" ORDER BY g.date, pg.game_id, pg.player_id");

        self.query_player_game_rows(&query, params)
    }

    /// Stat lines of `position` players in dated games `team_id` took part in,
    /// strictly before `before`, most recent game first.
    ///
    /// Rows from both sides of each game are returned; the caller decides
    /// which side a player was on.
    pub fn query_position_games_involving_team(
        &self,
        team_id: TeamId,
        position: Position,
        before: NaiveDate,
    ) -> Result<Vec<PlayerGameRow>> {
        let query = format!(
            "SELECT {} {}
             WHERE p.position = ?
               AND (g.home_team_id = ? OR g.away_team_id = ?)
               AND g.date IS NOT NULL
               AND g.date < ?
             ORDER BY g.date DESC, pg.game_id DESC, pg.player_id",
            player_game_columns(),
            PLAYER_GAME_JOINS
        );
        let params: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(position.to_string()),
            Box::new(team_id.as_u32()),
            Box::new(team_id.as_u32()),
            Box::new(before),
        ];

        self.query_player_game_rows(&query, params)
    }

    /// The roster interval covering `date` for `player_id`, if any.
    ///
    /// Fails with `RosterOverlap` if more than one interval matches.
    pub fn query_roster_interval(
        &self,
        player_id: PlayerId,
        date: NaiveDate,
    ) -> Result<Option<PlayerTeam>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, team_id, start_date, end_date
             FROM player_teams
             WHERE player_id = ?1
               AND start_date <= ?2
               AND (end_date IS NULL OR end_date >= ?2)
             LIMIT 2",
        )?;

        let mut matches = stmt
            .query_map(params![player_id.as_u64(), date], Self::row_to_player_team)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if matches.len() > 1 {
            return Err(FfaError::RosterOverlap { player_id, date }.into());
        }
        Ok(matches.pop())
    }

    /// Stat lines whose player has no roster interval with either participant
    /// covering the game date
    pub fn roster_gaps(&self) -> Result<Vec<RosterGap>> {
        let mut stmt = self.conn.prepare(
            "SELECT pg.player_id, p.name, pg.game_id, g.date, ht.code, awt.code
             FROM player_games pg
             JOIN players p ON p.player_id = pg.player_id
             JOIN games g ON g.game_id = pg.game_id
             JOIN teams ht ON ht.team_id = g.home_team_id
             JOIN teams awt ON awt.team_id = g.away_team_id
             WHERE g.date IS NOT NULL
               AND NOT EXISTS (
                   SELECT 1 FROM player_teams pt
                   WHERE pt.player_id = pg.player_id
                     AND pt.team_id IN (g.home_team_id, g.away_team_id)
                     AND pt.start_date <= g.date
                     AND (pt.end_date IS NULL OR pt.end_date >= g.date)
               )
             ORDER BY g.date, pg.game_id, pg.player_id",
        )?;

        let gaps = stmt
            .query_map([], |row| {
                Ok(RosterGap {
                    player_id: PlayerId::new(row.get(0)?),
                    player_name: row.get(1)?,
                    game_id: GameId::new(row.get(2)?),
                    date: row.get(3)?,
                    home_code: row.get(4)?,
                    away_code: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(gaps)
    }

    fn query_player_game_rows(
        &self,
        query: &str,
        params: Vec<Box<dyn rusqlite::ToSql>>,
    ) -> Result<Vec<PlayerGameRow>> {
        let mut stmt = self.conn.prepare(query)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt
            .query_map(&param_refs[..], Self::row_to_player_game_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn row_to_position(row: &Row, idx: usize) -> rusqlite::Result<Position> {
        let raw: String = row.get(idx)?;
        raw.parse::<Position>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }

    fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
        Ok(Player {
            player_id: PlayerId::new(row.get(0)?),
            name: row.get(1)?,
            position: Self::row_to_position(row, 2)?,
        })
    }

    fn row_to_team(row: &Row) -> rusqlite::Result<Team> {
        Ok(Team {
            team_id: TeamId::new(row.get(0)?),
            code: row.get(1)?,
            name: row.get(2)?,
            division: row.get(3)?,
        })
    }

    fn row_to_game(row: &Row) -> rusqlite::Result<Game> {
        Ok(Game {
            game_id: GameId::new(row.get(0)?),
            home_team: TeamId::new(row.get(1)?),
            away_team: TeamId::new(row.get(2)?),
            date: row.get(3)?,
            home_score: row.get(4)?,
            away_score: row.get(5)?,
            spread: row.get(6)?,
        })
    }

    fn row_to_player_team(row: &Row) -> rusqlite::Result<PlayerTeam> {
        Ok(PlayerTeam {
            player_id: PlayerId::new(row.get(0)?),
            team_id: TeamId::new(row.get(1)?),
            start_date: row.get(2)?,
            end_date: row.get(3)?,
        })
    }

    fn row_to_player_game_row(row: &Row) -> rusqlite::Result<PlayerGameRow> {
        let mut stats = StatLine::default();
        for (offset, stat) in Stat::ALL.iter().enumerate() {
            stats.set(*stat, row.get(6 + offset)?);
        }

        Ok(PlayerGameRow {
            player_id: PlayerId::new(row.get(0)?),
            game_id: GameId::new(row.get(1)?),
            position: Self::row_to_position(row, 2)?,
            date: row.get(3)?,
            home_team: TeamId::new(row.get(4)?),
            away_team: TeamId::new(row.get(5)?),
            stats,
        })
    }
}
