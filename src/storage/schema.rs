//! Database schema and connection management

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

/// Database connection manager for league data
pub struct LeagueDatabase {
    pub(crate) conn: Connection,
}

impl LeagueDatabase {
    /// Open (or create) the database at `path` and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure the data directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Create an in-memory database, used by tests and fixtures
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute("PRAGMA foreign_keys = ON", [])?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS teams (
                team_id INTEGER PRIMARY KEY,
                code TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                division TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                position TEXT NOT NULL
            )",
            [],
        )?;

        // Dates are ISO-8601 text so lexical comparison matches date order
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS games (
                game_id INTEGER PRIMARY KEY,
                home_team_id INTEGER NOT NULL,
                away_team_id INTEGER NOT NULL,
                date TEXT,
                home_score INTEGER,
                away_score INTEGER,
                spread REAL,
                FOREIGN KEY (home_team_id) REFERENCES teams(team_id),
                FOREIGN KEY (away_team_id) REFERENCES teams(team_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS player_games (
                player_id INTEGER NOT NULL,
                game_id INTEGER NOT NULL,
                pass_attempts REAL NOT NULL DEFAULT 0,
                pass_completions REAL NOT NULL DEFAULT 0,
                pass_yards REAL NOT NULL DEFAULT 0,
                pass_tds REAL NOT NULL DEFAULT 0,
                pass_int REAL NOT NULL DEFAULT 0,
                rush_attempts REAL NOT NULL DEFAULT 0,
                rush_yards REAL NOT NULL DEFAULT 0,
                rush_tds REAL NOT NULL DEFAULT 0,
                targets REAL NOT NULL DEFAULT 0,
                receptions REAL NOT NULL DEFAULT 0,
                rec_yards REAL NOT NULL DEFAULT 0,
                rec_tds REAL NOT NULL DEFAULT 0,
                PRIMARY KEY (player_id, game_id),
                FOREIGN KEY (player_id) REFERENCES players(player_id),
                FOREIGN KEY (game_id) REFERENCES games(game_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS player_teams (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                player_id INTEGER NOT NULL,
                team_id INTEGER NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT,
                FOREIGN KEY (player_id) REFERENCES players(player_id),
                FOREIGN KEY (team_id) REFERENCES teams(team_id)
            )",
            [],
        )?;

        // Create indexes for the point-in-time queries
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_games_date ON games(date)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_player_games_game ON player_games(game_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_player_teams_player
             ON player_teams(player_id, start_date)",
            [],
        )?;

        Ok(())
    }
}
