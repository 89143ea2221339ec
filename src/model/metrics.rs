//! Evaluation helpers

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Mean squared error; NaN when there is nothing to compare.
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / n as f64
}

/// Seeded shuffle of `0..n` split into (train, test) index sets.
///
/// The test share is rounded up, as long as at least one row is left to
/// train on.
pub fn train_test_split(n: usize, train_ratio: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_ratio = (1.0 - train_ratio).clamp(0.0, 1.0);
    let test_len = ((n as f64 * test_ratio).ceil() as usize).min(n.saturating_sub(1));
    let train = indices.split_off(test_len);
    (train, indices)
}
