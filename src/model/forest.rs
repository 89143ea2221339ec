//! Random forest regressor: bootstrap-aggregated CART trees

use super::{FittedModel, Regressor};
use crate::error::{FfaError, Result};
use ndarray::{Array1, Array2, ArrayView1};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: usize,
    /// Nodes with fewer samples become leaves
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    config: ForestConfig,
}

impl RandomForestRegressor {
    pub fn new(config: ForestConfig) -> Self {
        Self { config }
    }
}

impl Default for RandomForestRegressor {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl Regressor for RandomForestRegressor {
    fn name(&self) -> &'static str {
        "random-forest"
    }

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Box<dyn FittedModel>> {
        let n = x.nrows();
        if n == 0 || n != y.len() {
            return Err(FfaError::Model {
                message: format!("cannot fit forest on {} rows and {} targets", n, y.len()),
            });
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let trees = (0..self.config.n_trees.max(1))
            .map(|_| {
                let mut sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                RegressionTree::fit(x, y, &mut sample, &self.config)
            })
            .collect();

        Ok(Box::new(FittedForest { trees }))
    }
}

/// Averages the trees' predictions
struct FittedForest {
    trees: Vec<RegressionTree>,
}

impl FittedModel for FittedForest {
    fn predict(&self, x: &Array2<f64>) -> Array1<f64> {
        x.rows()
            .into_iter()
            .map(|row| {
                self.trees.iter().map(|tree| tree.predict_row(row)).sum::<f64>()
                    / self.trees.len() as f64
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone)]
struct RegressionTree {
    nodes: Vec<Node>,
}

struct SplitChoice {
    feature: usize,
    threshold: f64,
    /// Samples going left once sorted by `feature`
    left_len: usize,
}

impl RegressionTree {
    fn fit(x: &Array2<f64>, y: &Array1<f64>, sample: &mut [usize], config: &ForestConfig) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(x, y, sample, 0, config);
        tree
    }

    fn grow(
        &mut self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        sample: &mut [usize],
        depth: usize,
        config: &ForestConfig,
    ) -> usize {
        let mean = sample.iter().map(|&i| y[i]).sum::<f64>() / sample.len() as f64;
        let node_index = self.nodes.len();
        self.nodes.push(Node::Leaf { value: mean });

        if depth >= config.max_depth || sample.len() < config.min_samples_split.max(2) {
            return node_index;
        }

        let Some(split) = best_split(x, y, sample) else {
            return node_index;
        };

        sample.sort_by(|&a, &b| x[[a, split.feature]].total_cmp(&x[[b, split.feature]]));
        let (left_sample, right_sample) = sample.split_at_mut(split.left_len);

        let left = self.grow(x, y, left_sample, depth + 1, config);
        let right = self.grow(x, y, right_sample, depth + 1, config);
        self.nodes[node_index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        node_index
    }

    fn predict_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Split minimising the summed squared error of both children, if any
/// split improves on leaving the node whole.
fn best_split(x: &Array2<f64>, y: &Array1<f64>, sample: &[usize]) -> Option<SplitChoice> {
    let n = sample.len();
    let total: f64 = sample.iter().map(|&i| y[i]).sum();
    let total_sq: f64 = sample.iter().map(|&i| y[i] * y[i]).sum();
    let parent_sse = total_sq - total * total / n as f64;
    if parent_sse <= f64::EPSILON {
        return None;
    }

    let mut best: Option<(f64, SplitChoice)> = None;
    let mut order = sample.to_vec();

    for feature in 0..x.ncols() {
        order.sort_by(|&a, &b| x[[a, feature]].total_cmp(&x[[b, feature]]));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for k in 1..n {
            let moved = y[order[k - 1]];
            left_sum += moved;
            left_sq += moved * moved;

            let lower = x[[order[k - 1], feature]];
            let upper = x[[order[k], feature]];
            if lower == upper {
                continue;
            }

            let left_n = k as f64;
            let right_n = (n - k) as f64;
            let right_sum = total - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);

            if best.as_ref().map_or(true, |(best_sse, _)| sse < *best_sse) {
                best = Some((
                    sse,
                    SplitChoice {
                        feature,
                        threshold: (lower + upper) / 2.0,
                        left_len: k,
                    },
                ));
            }
        }
    }

    best.filter(|(sse, _)| *sse < parent_sse)
        .map(|(_, split)| split)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_forest_learns_step_function() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [10.0], [11.0], [12.0], [13.0]];
        let y = array![5.0, 5.0, 5.0, 5.0, 50.0, 50.0, 50.0, 50.0];

        let model = RandomForestRegressor::default().fit(&x, &y).unwrap();
        let predictions = model.predict(&array![[2.5], [11.5]]);

        assert!(predictions[0] < 20.0, "low side predicted {}", predictions[0]);
        assert!(predictions[1] > 35.0, "high side predicted {}", predictions[1]);
    }

    #[test]
    fn test_forest_is_deterministic_for_a_seed() {
        let x = array![[1.0, 0.5], [2.0, 1.5], [3.0, 0.2], [4.0, 3.3], [5.0, 2.1]];
        let y = array![10.0, 12.0, 9.0, 20.0, 15.0];
        let query = array![[2.5, 1.0]];

        let first = RandomForestRegressor::default().fit(&x, &y).unwrap().predict(&query);
        let second = RandomForestRegressor::default().fit(&x, &y).unwrap().predict(&query);

        assert_eq!(first, second);
    }

    #[test]
    fn test_constant_target_predicts_constant() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![7.0, 7.0, 7.0];

        let model = RandomForestRegressor::default().fit(&x, &y).unwrap();
        assert_eq!(model.predict(&array![[100.0]])[0], 7.0);
    }

    #[test]
    fn test_fit_rejects_empty_input() {
        let x = Array2::<f64>::zeros((0, 2));
        let y = Array1::<f64>::zeros(0);

        assert!(matches!(
            RandomForestRegressor::default().fit(&x, &y),
            Err(FfaError::Model { .. })
        ));
    }

    #[test]
    fn test_best_split_finds_gap() {
        let x = array![[1.0], [2.0], [8.0], [9.0]];
        let y = array![1.0, 1.0, 9.0, 9.0];

        let split = best_split(&x, &y, &[0, 1, 2, 3]).unwrap();
        assert_eq!(split.feature, 0);
        assert_eq!(split.threshold, 5.0);
        assert_eq!(split.left_len, 2);
    }
}
