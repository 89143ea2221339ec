//! Command implementations for the ffa-predict CLI

pub mod dataset;
pub mod predict;
pub mod roster_audit;

#[cfg(test)]
mod tests;

use crate::{error::FfaError, storage::LeagueDatabase, Result, DATABASE_PATH_ENV_VAR};
use std::path::PathBuf;
use tracing::debug;

/// Resolve the database path from the flag, the environment, or the user data dir
pub fn resolve_database_path(database: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = database {
        return Ok(path);
    }

    if let Some(path) = std::env::var_os(DATABASE_PATH_ENV_VAR).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    dirs::data_dir()
        .map(|dir| dir.join("ffa-predict").join("ffa.db"))
        .ok_or_else(|| FfaError::MissingDataDir {
            env_var: DATABASE_PATH_ENV_VAR.to_string(),
        })
}

/// Open the league database at the resolved location
pub fn open_database(database: Option<PathBuf>) -> Result<LeagueDatabase> {
    let path = resolve_database_path(database)?;
    debug!(path = %path.display(), "opening league database");
    Ok(LeagueDatabase::open(&path)?)
}
