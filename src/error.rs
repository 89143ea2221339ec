//! Error types for the fantasy-football forecasting pipeline

use crate::cli::types::{PlayerId, Position};
use crate::storage::Stat;
use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FfaError>;

#[derive(Error, Debug)]
pub enum FfaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("No roster interval covers player {player_id} on {date}")]
    RosterGap { player_id: PlayerId, date: NaiveDate },

    #[error("Overlapping roster intervals for player {player_id} on {date}")]
    RosterOverlap { player_id: PlayerId, date: NaiveDate },

    #[error("Insufficient history: {context}")]
    InsufficientHistory { context: String },

    #[error("Missing feature column {column} required to predict {stat}")]
    MissingFeature { stat: Stat, column: String },

    #[error("Position {position} is not supported by the forecasting pipeline")]
    UnsupportedPosition { position: Position },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid stat name: {name}")]
    InvalidStat { name: String },

    #[error("Failed to parse ID: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Failed to parse date: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    #[error("Database path not provided, {env_var} not set and no data directory available")]
    MissingDataDir { env_var: String },

    #[error("Model error: {message}")]
    Model { message: String },
}

impl From<anyhow::Error> for FfaError {
    fn from(err: anyhow::Error) -> Self {
        // Storage helpers raise typed errors through anyhow; keep them typed.
        match err.downcast::<FfaError>() {
            Ok(typed) => typed,
            Err(other) => FfaError::Storage {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests;
