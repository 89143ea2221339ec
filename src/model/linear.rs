//! Ordinary least squares through linfa-linear

use super::{FittedModel, Regressor};
use crate::error::{FfaError, Result};
use linfa::prelude::*;
use linfa::Dataset;
use linfa_linear::{FittedLinearRegression, LinearRegression};
use ndarray::{Array1, Array2};

#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRegressor;

impl Regressor for LinearRegressor {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Box<dyn FittedModel>> {
        let dataset = Dataset::new(x.clone(), y.clone());
        let model = LinearRegression::new()
            .fit(&dataset)
            .map_err(|e| FfaError::Model {
                message: e.to_string(),
            })?;
        Ok(Box::new(LinearModel { model }))
    }
}

struct LinearModel {
    model: FittedLinearRegression<f64>,
}

impl FittedModel for LinearModel {
    fn predict(&self, x: &Array2<f64>) -> Array1<f64> {
        self.model.predict(x)
    }
}
