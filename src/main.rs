//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use ffa_predict::{
    cli::{Commands, FfaCli},
    commands::{
        dataset::handle_dataset,
        predict::{handle_predict, PredictParams},
        roster_audit::handle_roster_audit,
    },
    pipeline::DEFAULT_SEED,
    Result,
};
use tracing_subscriber::EnvFilter;

/// Run the CLI.
fn main() -> Result<()> {
    let app = FfaCli::parse();

    let default_level = if app.verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match app.command {
        Commands::Predict {
            player,
            opponent,
            pipeline,
            model,
            seed,
            json,
        } => handle_predict(
            app.database,
            PredictParams {
                player_name: player,
                opponent_code: opponent,
                as_of: pipeline.as_of,
                model,
                config: pipeline.config(seed),
                as_json: json,
            },
        )?,

        Commands::Dataset {
            position,
            pipeline,
            json,
        } => handle_dataset(
            app.database,
            position,
            pipeline.as_of,
            pipeline.config(DEFAULT_SEED),
            json,
        )?,

        Commands::RosterAudit { json } => handle_roster_audit(app.database, json)?,
    }

    Ok(())
}
