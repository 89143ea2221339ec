//! Dataset command implementation

use crate::{
    pipeline::{build_training_dataset, PipelineConfig, RosterResolver, TrainingSet},
    storage::LeagueDatabase,
    Position, Result,
};
use chrono::NaiveDate;
use std::path::PathBuf;

use super::open_database;

/// Build the training table for a position, restricted to games before `as_of` if given
pub fn run_dataset(
    db: &LeagueDatabase,
    position: Position,
    as_of: Option<NaiveDate>,
    config: &PipelineConfig,
) -> Result<TrainingSet> {
    let mut resolver = RosterResolver::new(db);
    build_training_dataset(&mut resolver, position, as_of, config)
}

/// Handle the dataset command
pub fn handle_dataset(
    database: Option<PathBuf>,
    position: Position,
    as_of: Option<NaiveDate>,
    config: PipelineConfig,
    as_json: bool,
) -> Result<()> {
    let db = open_database(database)?;
    let dataset = run_dataset(&db, position, as_of, &config)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&dataset)?); // tarpaulin::skip
        return Ok(());
    }

    let summary = &dataset.summary;
    // tarpaulin::skip - console output
    println!("Training dataset for {} (window {})", position, config.window);
    println!("  Candidate stat lines:   {}", summary.candidates);
    println!("  Roster gaps skipped:    {}", summary.roster_gaps);
    println!("  Roster mismatches:      {}", summary.roster_mismatches);
    println!("  Labeled rows:           {}", summary.labeled);
    println!("  Insufficient history:   {}", summary.insufficient_history);
    println!("  Usable rows:            {}", summary.rows);
    println!("  Feature columns:        {}", dataset.feature_columns.join(", "));

    Ok(())
}
