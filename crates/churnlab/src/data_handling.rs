//! Train/held-out partitioning shared by both classifiers.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::PipelineError;
use crate::math::{Array1, Array2};

/// One train/held-out partition. Both models are fit on the identical
/// training rows and evaluated on the identical held-out rows, which is what
/// makes the evaluation a fair head-to-head comparison.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Array2<f64>,
    pub y_train: Array1<u8>,
    pub x_test: Array2<f64>,
    pub y_test: Array1<u8>,
}

/// Deterministic, seed-controlled shuffle-and-cut. `test_fraction` of the
/// rows (rounded) become the held-out set; the rest are the training set.
pub fn split_train_test<R: Rng>(
    x: &Array2<f64>,
    y: &Array1<u8>,
    test_fraction: f64,
    rng: &mut R,
) -> Result<TrainTestSplit, PipelineError> {
    if x.nrows() != y.len() {
        return Err(PipelineError::SchemaMismatch {
            stage: "data_handling::split_train_test",
            detail: format!("{} feature rows but {} labels", x.nrows(), y.len()),
        });
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(PipelineError::InvalidArgument {
            stage: "data_handling::split_train_test",
            reason: format!("test_fraction must lie in (0, 1), got {}", test_fraction),
        });
    }

    let n_samples = x.nrows();
    let n_test = (n_samples as f64 * test_fraction).round() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(PipelineError::InvalidArgument {
            stage: "data_handling::split_train_test",
            reason: format!(
                "test_fraction {} leaves an empty partition for {} rows",
                test_fraction, n_samples
            ),
        });
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(rng);

    let (test_indices, train_indices) = indices.split_at(n_test);

    log::debug!(
        "split {} rows into {} training and {} held-out",
        n_samples,
        train_indices.len(),
        test_indices.len()
    );

    Ok(TrainTestSplit {
        x_train: x.select_rows(train_indices),
        y_train: y.select(train_indices),
        x_test: x.select_rows(test_indices),
        y_test: y.select(test_indices),
    })
}

/// Fail with `DegenerateTrainingSet` unless both classes are represented.
/// Small populations or extreme seeds can realize no churners at all; the
/// models refuse to train on such a partition.
pub fn ensure_both_classes(y: &[u8]) -> Result<(), PipelineError> {
    let churners = y.iter().filter(|&&v| v == 1).count();
    if churners == 0 || churners == y.len() {
        return Err(PipelineError::DegenerateTrainingSet {
            present_class: if churners == 0 { 0 } else { 1 },
            rows: y.len(),
        });
    }
    Ok(())
}
