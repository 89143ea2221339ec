//! Per-stat forecast for one player against one opponent.
//!
//! Trains one model per target stat on the player's position using only games
//! before the as-of date, then predicts from the player's recent form and the
//! opponent's recent defensive record.

use crate::{
    error::FfaError,
    model::{train_position_models, ModelKind},
    pipeline::{build_training_dataset, feature_stats, query_features, FeatureVector, PipelineConfig, RosterResolver},
    storage::{LeagueDatabase, Stat},
    PlayerId, Position, Result,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

use super::open_database;

/// Parameters for the predict command
#[derive(Debug, Clone)]
pub struct PredictParams {
    pub player_name: String,
    pub opponent_code: String,
    /// Defaults to today
    pub as_of: Option<NaiveDate>,
    pub model: ModelKind,
    pub config: PipelineConfig,
    pub as_json: bool,
}

/// One predicted stat, or why it could not be predicted
#[derive(Debug, Clone, Serialize)]
pub struct StatEstimate {
    pub stat: Stat,
    pub value: Option<f64>,
    pub error: Option<String>,
    pub test_mse: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub player_id: PlayerId,
    pub player_name: String,
    pub position: Position,
    pub opponent: String,
    pub as_of: NaiveDate,
    pub model: &'static str,
    pub training_rows: usize,
    pub features: FeatureVector,
    pub estimates: Vec<StatEstimate>,
}

/// Train and predict without printing anything
pub fn run_prediction(db: &LeagueDatabase, params: &PredictParams) -> Result<PredictionReport> {
    let player = db
        .find_player_by_name(&params.player_name)?
        .ok_or_else(|| FfaError::NotFound {
            entity: "player",
            key: params.player_name.clone(),
        })?;
    feature_stats(player.position)?;

    let opponent = db
        .find_team_by_code(&params.opponent_code)?
        .ok_or_else(|| FfaError::NotFound {
            entity: "team",
            key: params.opponent_code.clone(),
        })?;

    let as_of = params
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let mut resolver = RosterResolver::new(db);
    let dataset =
        build_training_dataset(&mut resolver, player.position, Some(as_of), &params.config)?;

    let regressor = params.model.regressor(params.config.seed);
    let models = train_position_models(&dataset, regressor.as_ref(), &params.config)?;

    let features = query_features(
        &mut resolver,
        &player,
        opponent.team_id,
        as_of,
        params.config.window,
    )?;

    let estimates = models
        .predict(&features)
        .into_iter()
        .map(|prediction| match prediction.value {
            Ok(value) => StatEstimate {
                stat: prediction.stat,
                value: Some(value),
                error: None,
                test_mse: prediction.test_mse,
            },
            Err(e) => StatEstimate {
                stat: prediction.stat,
                value: None,
                error: Some(e.to_string()),
                test_mse: prediction.test_mse,
            },
        })
        .collect();

    Ok(PredictionReport {
        player_id: player.player_id,
        player_name: player.name,
        position: player.position,
        opponent: opponent.code,
        as_of,
        model: models.regressor,
        training_rows: dataset.len(),
        features,
        estimates,
    })
}

/// Handle the predict command
pub fn handle_predict(database: Option<PathBuf>, params: PredictParams) -> Result<()> {
    let db = open_database(database)?;
    let report = run_prediction(&db, &params)?;

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&report)?); // tarpaulin::skip
        return Ok(());
    }

    // tarpaulin::skip - console output
    println!(
        "{} ({}) vs {} as of {}",
        report.player_name, report.position, report.opponent, report.as_of
    );
    println!(
        "Model: {} trained on {} rows",
        report.model, report.training_rows
    );
    println!();
    println!("{:<18} {:<10} {:<10}", "Stat", "Predicted", "Test MSE");
    println!("{:<18} {:<10} {:<10}", "----", "---------", "--------");

    for estimate in &report.estimates {
        let value = match (estimate.value, &estimate.error) {
            (Some(v), _) => format!("{:.1}", v),
            (None, Some(e)) => format!("n/a ({})", e),
            (None, None) => "n/a".to_string(),
        };
        let mse = estimate
            .test_mse
            .map_or_else(|| "--".to_string(), |m| format!("{:.2}", m));
        println!("{:<18} {:<10} {:<10}", estimate.stat.to_string(), value, mse);
    }

    Ok(())
}
