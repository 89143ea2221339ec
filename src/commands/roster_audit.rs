//! Roster audit: stat lines no roster interval accounts for.
//!
//! Read-only. Each reported line is one the dataset builder will skip; fix
//! them by inserting or extending the player's roster intervals.

use crate::{
    storage::{LeagueDatabase, RosterGap},
    Result,
};
use std::path::PathBuf;

use super::open_database;

pub fn run_roster_audit(db: &LeagueDatabase) -> Result<Vec<RosterGap>> {
    Ok(db.roster_gaps()?)
}

/// Handle the roster-audit command
pub fn handle_roster_audit(database: Option<PathBuf>, as_json: bool) -> Result<()> {
    let db = open_database(database)?;
    let gaps = run_roster_audit(&db)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&gaps)?); // tarpaulin::skip
        return Ok(());
    }

    if gaps.is_empty() {
        println!("✓ Every stat line is covered by a roster interval");
        return Ok(());
    }

    // tarpaulin::skip - console output
    println!("{} stat lines without roster coverage", gaps.len());
    println!();
    println!(
        "{:<12} {:<24} {:<10} {:<12} Matchup",
        "Player ID", "Name", "Game", "Date"
    );
    println!(
        "{:<12} {:<24} {:<10} {:<12} -------",
        "---------", "----", "----", "----"
    );
    for gap in &gaps {
        println!(
            "{:<12} {:<24} {:<10} {:<12} {} @ {}",
            gap.player_id,
            gap.player_name.chars().take(24).collect::<String>(),
            gap.game_id,
            gap.date,
            gap.away_code,
            gap.home_code
        );
    }

    Ok(())
}
