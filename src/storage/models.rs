//! Data models for the storage layer

use crate::cli::types::{GameId, PlayerId, Position, TeamId};
use crate::error::FfaError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Counting statistics recorded per player per game.
///
/// The enumeration is the single mapping from stat names to `StatLine`
/// fields; every place that generalizes over stat columns goes through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    PassAttempts,
    PassCompletions,
    PassYards,
    PassTds,
    PassInt,
    RushAttempts,
    RushYards,
    RushTds,
    Targets,
    Receptions,
    RecYards,
    RecTds,
}

/// Broad stat families, used to decide which features feed which target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatGroup {
    Passing,
    Rushing,
    Receiving,
}

impl Stat {
    pub const ALL: [Stat; 12] = [
        Stat::PassAttempts,
        Stat::PassCompletions,
        Stat::PassYards,
        Stat::PassTds,
        Stat::PassInt,
        Stat::RushAttempts,
        Stat::RushYards,
        Stat::RushTds,
        Stat::Targets,
        Stat::Receptions,
        Stat::RecYards,
        Stat::RecTds,
    ];

    /// Column name, shared by the database schema and feature names.
    pub fn name(&self) -> &'static str {
        match self {
            Stat::PassAttempts => "pass_attempts",
            Stat::PassCompletions => "pass_completions",
            Stat::PassYards => "pass_yards",
            Stat::PassTds => "pass_tds",
            Stat::PassInt => "pass_int",
            Stat::RushAttempts => "rush_attempts",
            Stat::RushYards => "rush_yards",
            Stat::RushTds => "rush_tds",
            Stat::Targets => "targets",
            Stat::Receptions => "receptions",
            Stat::RecYards => "rec_yards",
            Stat::RecTds => "rec_tds",
        }
    }

    pub fn group(&self) -> StatGroup {
        match self {
            Stat::PassAttempts
            | Stat::PassCompletions
            | Stat::PassYards
            | Stat::PassTds
            | Stat::PassInt => StatGroup::Passing,
            Stat::RushAttempts | Stat::RushYards | Stat::RushTds => StatGroup::Rushing,
            Stat::Targets | Stat::Receptions | Stat::RecYards | Stat::RecTds => {
                StatGroup::Receiving
            }
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Stat {
    type Err = FfaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Stat::ALL
            .into_iter()
            .find(|stat| stat.name() == wanted)
            .ok_or_else(|| FfaError::InvalidStat {
                name: s.to_string(),
            })
    }
}

/// One player's counting stats for one game. Unrecorded stats are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub pass_attempts: f64,
    pub pass_completions: f64,
    pub pass_yards: f64,
    pub pass_tds: f64,
    pub pass_int: f64,
    pub rush_attempts: f64,
    pub rush_yards: f64,
    pub rush_tds: f64,
    pub targets: f64,
    pub receptions: f64,
    pub rec_yards: f64,
    pub rec_tds: f64,
}

impl StatLine {
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::PassAttempts => self.pass_attempts,
            Stat::PassCompletions => self.pass_completions,
            Stat::PassYards => self.pass_yards,
            Stat::PassTds => self.pass_tds,
            Stat::PassInt => self.pass_int,
            Stat::RushAttempts => self.rush_attempts,
            Stat::RushYards => self.rush_yards,
            Stat::RushTds => self.rush_tds,
            Stat::Targets => self.targets,
            Stat::Receptions => self.receptions,
            Stat::RecYards => self.rec_yards,
            Stat::RecTds => self.rec_tds,
        }
    }

    pub fn set(&mut self, stat: Stat, value: f64) {
        let slot = match stat {
            Stat::PassAttempts => &mut self.pass_attempts,
            Stat::PassCompletions => &mut self.pass_completions,
            Stat::PassYards => &mut self.pass_yards,
            Stat::PassTds => &mut self.pass_tds,
            Stat::PassInt => &mut self.pass_int,
            Stat::RushAttempts => &mut self.rush_attempts,
            Stat::RushYards => &mut self.rush_yards,
            Stat::RushTds => &mut self.rush_tds,
            Stat::Targets => &mut self.targets,
            Stat::Receptions => &mut self.receptions,
            Stat::RecYards => &mut self.rec_yards,
            Stat::RecTds => &mut self.rec_tds,
        };
        *slot = value;
    }

    /// Builder-style setter, handy for fixtures.
    pub fn with(mut self, stat: Stat, value: f64) -> Self {
        self.set(stat, value);
        self
    }
}

/// Player information stored in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
}

/// Team information stored in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    /// Short abbreviation, e.g. "GB".
    pub code: String,
    pub name: String,
    /// Conference/division grouping, e.g. "NFC North".
    pub division: String,
}

/// A scheduled or played game. Scores and spread are not used by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: GameId,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub date: Option<NaiveDate>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub spread: Option<f64>,
}

impl Game {
    pub fn involves(&self, team: TeamId) -> bool {
        self.home_team == team || self.away_team == team
    }

    /// The other participant, or `None` if `team` did not play in this game.
    pub fn opponent_of(&self, team: TeamId) -> Option<TeamId> {
        if team == self.home_team {
            Some(self.away_team)
        } else if team == self.away_team {
            Some(self.home_team)
        } else {
            None
        }
    }
}

/// Time-ranged roster membership. `end_date == None` means still active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTeam {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl PlayerTeam {
    /// Inclusive on both ends; an open interval covers every later date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date.map_or(true, |end| end >= date)
    }

    pub fn overlaps(&self, other: &PlayerTeam) -> bool {
        let starts_before_other_ends = other.end_date.map_or(true, |end| self.start_date <= end);
        let other_starts_before_self_ends =
            self.end_date.map_or(true, |end| other.start_date <= end);
        starts_before_other_ends && other_starts_before_self_ends
    }
}

/// One player's stat line for one game, as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerGame {
    pub player_id: PlayerId,
    pub game_id: GameId,
    pub stats: StatLine,
}

/// A PlayerGame joined with its player's position and its game's context.
///
/// Only dated games produce rows, so `date` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerGameRow {
    pub player_id: PlayerId,
    pub game_id: GameId,
    pub position: Position,
    pub date: NaiveDate,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub stats: StatLine,
}

impl PlayerGameRow {
    pub fn opponent_of(&self, team: TeamId) -> Option<TeamId> {
        if team == self.home_team {
            Some(self.away_team)
        } else if team == self.away_team {
            Some(self.home_team)
        } else {
            None
        }
    }
}

/// Sort order for player game queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOrder {
    MostRecentFirst,
    Chronological,
}

/// A PlayerGame whose player has no roster interval covering the game date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterGap {
    pub player_id: PlayerId,
    pub player_name: String,
    pub game_id: GameId,
    pub date: NaiveDate,
    pub home_code: String,
    pub away_code: String,
}
