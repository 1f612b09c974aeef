//! Seeded train/test partitioning

use crate::error::{PrediksiError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Row indices of one train/test partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainTestSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Shuffle `0..n_samples` with a seeded generator and carve off
/// `ceil(n_samples * test_fraction)` rows for the held-out partition.
///
/// Identical inputs produce identical index vectors. Errors when either
/// partition would come out empty.
pub fn train_test_split(
    n_samples: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    if test_fraction <= 0.0 || test_fraction >= 1.0 {
        return Err(PrediksiError::InvalidInput(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let test_size = (n_samples as f64 * test_fraction).ceil() as usize;
    let train_size = n_samples.saturating_sub(test_size);

    if train_size == 0 || test_size == 0 {
        return Err(PrediksiError::InsufficientData(format!(
            "cannot split {n_samples} rows into non-empty train and test partitions"
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    Ok(TrainTestSplit {
        test_indices: indices[train_size..].to_vec(),
        train_indices: indices[..train_size].to_vec(),
    })
}
