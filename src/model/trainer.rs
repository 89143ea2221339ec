//! Per-stat model training and prediction

use super::{
    metrics::{mean_squared_error, train_test_split},
    FittedModel, Regressor,
};
use crate::{
    error::{FfaError, Result},
    pipeline::{feature_stats, FeatureSide, FeatureVector, PipelineConfig, TrainingSet},
    storage::Stat,
    Position,
};
use ndarray::{Array1, Array2};
use tracing::{info, warn};

/// One fitted model for one target stat.
pub struct StatModel {
    pub target: Stat,
    pub feature_columns: Vec<String>,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Held-out mean squared error; `None` when nothing was held out
    pub test_mse: Option<f64>,
    model: Box<dyn FittedModel>,
}

impl StatModel {
    /// Predict from a query vector; every trained column must be present.
    pub fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let mut row = Vec::with_capacity(self.feature_columns.len());
        for column in &self.feature_columns {
            let value = features.get(column).ok_or_else(|| FfaError::MissingFeature {
                stat: self.target,
                column: column.clone(),
            })?;
            row.push(value);
        }

        let x = Array2::from_shape_vec((1, row.len()), row).map_err(|e| FfaError::Model {
            message: e.to_string(),
        })?;
        Ok(self.model.predict(&x)[0])
    }
}

/// Outcome of predicting one stat; stats fail independently.
#[derive(Debug)]
pub struct StatPrediction {
    pub stat: Stat,
    pub value: Result<f64>,
    pub test_mse: Option<f64>,
}

/// All per-stat models trained for a position.
pub struct PositionModels {
    pub position: Position,
    pub regressor: &'static str,
    pub models: Vec<StatModel>,
}

impl PositionModels {
    pub fn predict(&self, features: &FeatureVector) -> Vec<StatPrediction> {
        self.models
            .iter()
            .map(|model| StatPrediction {
                stat: model.target,
                value: model.predict(features),
                test_mse: model.test_mse,
            })
            .collect()
    }

    pub fn get(&self, stat: Stat) -> Option<&StatModel> {
        self.models.iter().find(|model| model.target == stat)
    }
}

/// Player and defense columns, present in the table, for stats in the same
/// family (passing, rushing, receiving) as `target`.
pub fn relevant_feature_columns(dataset: &TrainingSet, target: Stat) -> Result<Vec<String>> {
    let stats = feature_stats(dataset.position)?;
    let columns = FeatureSide::BOTH
        .iter()
        .flat_map(|side| {
            stats
                .iter()
                .filter(|stat| stat.group() == target.group())
                .map(move |stat| side.column(*stat))
        })
        .filter(|column| dataset.feature_columns.contains(column))
        .collect();
    Ok(columns)
}

fn feature_matrix(dataset: &TrainingSet, indices: &[usize], columns: &[String]) -> Result<Array2<f64>> {
    let mut values = Vec::with_capacity(indices.len() * columns.len());
    for &i in indices {
        let row = &dataset.rows[i];
        for column in columns {
            let value = row.features.get(column).ok_or_else(|| FfaError::InsufficientHistory {
                context: format!("training row for game {} lacks {}", row.game_id, column),
            })?;
            values.push(value);
        }
    }
    Array2::from_shape_vec((indices.len(), columns.len()), values).map_err(|e| FfaError::Model {
        message: e.to_string(),
    })
}

fn target_vector(dataset: &TrainingSet, indices: &[usize], target: Stat) -> Array1<f64> {
    indices
        .iter()
        .map(|&i| dataset.rows[i].targets.get(&target).copied().unwrap_or(0.0))
        .collect()
}

/// Fits one model per target stat of the dataset.
///
/// Rows are shuffled with `config.seed` and split by `config.train_ratio`;
/// the held-out part only feeds the reported MSE.
pub fn train_position_models(
    dataset: &TrainingSet,
    regressor: &dyn Regressor,
    config: &PipelineConfig,
) -> Result<PositionModels> {
    if dataset.len() < 2 {
        return Err(FfaError::InsufficientHistory {
            context: format!(
                "{} usable {} training rows, need at least 2",
                dataset.len(),
                dataset.position
            ),
        });
    }

    let (train_idx, test_idx) = train_test_split(dataset.len(), config.train_ratio, config.seed);

    let mut models = Vec::with_capacity(dataset.target_stats.len());
    for &target in &dataset.target_stats {
        let columns = relevant_feature_columns(dataset, target)?;
        if columns.is_empty() {
            warn!(%target, "no feature columns available, skipping model");
            continue;
        }

        let x_train = feature_matrix(dataset, &train_idx, &columns)?;
        let y_train = target_vector(dataset, &train_idx, target);
        let model = regressor.fit(&x_train, &y_train)?;

        let test_mse = if test_idx.is_empty() {
            None
        } else {
            let x_test = feature_matrix(dataset, &test_idx, &columns)?;
            let y_test = target_vector(dataset, &test_idx, target);
            let predicted = model.predict(&x_test);
            Some(mean_squared_error(
                &y_test.to_vec(),
                &predicted.to_vec(),
            ))
        };

        info!(
            %target,
            regressor = regressor.name(),
            features = columns.len(),
            train_rows = train_idx.len(),
            test_rows = test_idx.len(),
            test_mse = ?test_mse,
            "trained stat model"
        );

        models.push(StatModel {
            target,
            feature_columns: columns,
            train_rows: train_idx.len(),
            test_rows: test_idx.len(),
            test_mse,
            model,
        });
    }

    Ok(PositionModels {
        position: dataset.position,
        regressor: regressor.name(),
        models,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RandomForestRegressor;
    use crate::pipeline::{expected_feature_columns, DatasetSummary, StatAverages, TrainingRow};
    use crate::{GameId, PlayerId, TeamId};
    use chrono::NaiveDate;

    fn features(level: f64) -> FeatureVector {
        let stats = feature_stats(Position::RB).unwrap();
        let averages: StatAverages = stats.iter().map(|s| (*s, level)).collect();
        FeatureVector::from_averages(FeatureSide::Player, &averages)
            .merged(FeatureVector::from_averages(FeatureSide::Defense, &averages))
    }

    fn dataset(n: usize) -> TrainingSet {
        let rows = (0..n)
            .map(|i| TrainingRow {
                player_id: PlayerId::new(i as u64),
                game_id: GameId::new(i as u64),
                date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
                defense_team: TeamId::new(1),
                features: features(i as f64),
                targets: feature_stats(Position::RB)
                    .unwrap()
                    .iter()
                    .map(|s| (*s, i as f64 * 10.0))
                    .collect(),
            })
            .collect();

        TrainingSet {
            position: Position::RB,
            feature_columns: expected_feature_columns(Position::RB).unwrap(),
            target_stats: feature_stats(Position::RB).unwrap().to_vec(),
            rows,
            summary: DatasetSummary::default(),
        }
    }

    #[test]
    fn test_relevant_columns_follow_stat_group() {
        let columns = relevant_feature_columns(&dataset(2), Stat::RecYards).unwrap();
        assert_eq!(columns.len(), 8);
        assert!(columns.iter().all(|c| !c.contains("rush")));
        assert!(columns.contains(&"defense_targets".to_string()));
    }

    #[test]
    fn test_training_needs_two_rows() {
        let result = train_position_models(
            &dataset(1),
            &RandomForestRegressor::default(),
            &PipelineConfig::default(),
        );
        assert!(matches!(result, Err(FfaError::InsufficientHistory { .. })));
    }

    #[test]
    fn test_train_and_predict_per_stat() {
        let models = train_position_models(
            &dataset(10),
            &RandomForestRegressor::default(),
            &PipelineConfig::default(),
        )
        .unwrap();

        assert_eq!(models.models.len(), 7);
        assert_eq!(models.regressor, "random-forest");
        let rush_yards = models.get(Stat::RushYards).unwrap();
        assert_eq!(rush_yards.train_rows, 8);
        assert_eq!(rush_yards.test_rows, 2);
        assert!(rush_yards.test_mse.is_some());

        let predictions = models.predict(&features(9.0));
        assert!(predictions.iter().all(|p| p.value.is_ok()));
    }

    #[test]
    fn test_missing_column_fails_only_that_prediction() {
        let models = train_position_models(
            &dataset(10),
            &RandomForestRegressor::default(),
            &PipelineConfig::default(),
        )
        .unwrap();

        let averages: StatAverages = [(Stat::RushYards, 40.0), (Stat::RushAttempts, 9.0), (Stat::RushTds, 0.5)]
            .into_iter()
            .collect();
        let rushing_only = FeatureVector::from_averages(FeatureSide::Player, &averages)
            .merged(FeatureVector::from_averages(FeatureSide::Defense, &averages));

        for prediction in models.predict(&rushing_only) {
            match prediction.stat.group() {
                crate::storage::StatGroup::Rushing => assert!(prediction.value.is_ok()),
                _ => assert!(matches!(
                    prediction.value,
                    Err(FfaError::MissingFeature { .. })
                )),
            }
        }
    }
}
