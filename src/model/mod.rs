//! Regression models over the assembled training table
//!
//! - `forest`: bagged regression trees (default)
//! - `linear`: ordinary least squares through linfa
//! - `metrics`: train/test split and error measures
//! - `trainer`: one model per target stat, and prediction

pub mod forest;
pub mod linear;
pub mod metrics;
pub mod trainer;

pub use forest::{ForestConfig, RandomForestRegressor};
pub use linear::LinearRegressor;
pub use trainer::{train_position_models, PositionModels, StatModel, StatPrediction};

use crate::error::{FfaError, Result};
use ndarray::{Array1, Array2};
use std::fmt;
use std::str::FromStr;

/// A fitted model mapping feature rows to one target value each.
pub trait FittedModel {
    fn predict(&self, x: &Array2<f64>) -> Array1<f64>;
}

/// Model family capable of `fit(X, y) -> model`.
pub trait Regressor {
    fn name(&self) -> &'static str;

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Box<dyn FittedModel>>;
}

/// Model family selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelKind {
    #[default]
    Forest,
    Linear,
}

impl ModelKind {
    pub fn regressor(&self, seed: u64) -> Box<dyn Regressor> {
        match self {
            ModelKind::Forest => Box::new(RandomForestRegressor::new(ForestConfig {
                seed,
                ..ForestConfig::default()
            })),
            ModelKind::Linear => Box::new(LinearRegressor),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Forest => write!(f, "forest"),
            ModelKind::Linear => write!(f, "linear"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = FfaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "forest" | "random-forest" | "rf" => Ok(ModelKind::Forest),
            "linear" | "ols" => Ok(ModelKind::Linear),
            other => Err(FfaError::Model {
                message: format!("unknown model family: {other}"),
            }),
        }
    }
}
