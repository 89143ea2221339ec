//! CLI argument definitions and parsing.

pub mod types;

use crate::{
    model::ModelKind,
    pipeline::{PipelineConfig, DEFAULT_SEED, DEFAULT_WINDOW},
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::Position;

/// Pipeline tunables shared by commands that build a training table
#[derive(Debug, Args)]
pub struct PipelineArgs {
    /// Only use games strictly before this date (YYYY-MM-DD).
    #[clap(long)]
    pub as_of: Option<NaiveDate>,

    /// Number of prior games averaged into each feature.
    #[clap(long, default_value_t = DEFAULT_WINDOW)]
    pub window: usize,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Predict a player's stat line against an opponent.
    ///
    /// Trains one model per stat on the player's position using games
    /// before the as-of date (default today).
    Predict {
        /// Player display name (case-insensitive).
        #[clap(long, short)]
        player: String,

        /// Opponent team code, e.g. `GB`.
        #[clap(long, short)]
        opponent: String,

        #[clap(flatten)]
        pipeline: PipelineArgs,

        /// Model family: `forest` or `linear`.
        #[clap(long, short, default_value_t = ModelKind::default())]
        model: ModelKind,

        /// Seed for the train/test shuffle and the forest.
        #[clap(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Build the training table for a position and print a summary.
    Dataset {
        /// Position to build for: QB, RB, WR or TE.
        #[clap(short = 'p', long = "position")]
        position: Position,

        #[clap(flatten)]
        pipeline: PipelineArgs,

        /// Output the rows as JSON instead of a summary.
        #[clap(long)]
        json: bool,
    },

    /// List stat lines that no roster interval covers.
    RosterAudit {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "ffa-predict",
    about = "Roster-aware fantasy football stat forecasts"
)]
pub struct FfaCli {
    /// Database file (or set `FFA_DATABASE_PATH` env var).
    #[clap(long, global = true)]
    pub database: Option<PathBuf>,

    /// Log pipeline progress to stderr (`RUST_LOG` overrides).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

impl PipelineArgs {
    pub fn config(&self, seed: u64) -> PipelineConfig {
        PipelineConfig {
            window: self.window,
            seed,
            ..PipelineConfig::default()
        }
    }
}
