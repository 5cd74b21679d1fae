//! Integration tests for the shuffle-and-cut partitioner.

use rand::rngs::StdRng;
use rand::SeedableRng;

use churnlab::data_handling::{ensure_both_classes, split_train_test};
use churnlab::error::PipelineError;
use churnlab::math::{Array1, Array2};

fn toy_data(n: usize) -> (Array2<f64>, Array1<u8>) {
    let data: Vec<f64> = (0..n * 2).map(|v| v as f64).collect();
    let x = Array2::from_shape_vec((n, 2), data).unwrap();
    let y: Array1<u8> = (0..n).map(|i| (i % 2) as u8).collect();
    (x, y)
}

// ---------------------------------------------------------------------------
// Partition sizes and determinism
// ---------------------------------------------------------------------------

#[test]
fn default_fraction_cuts_a_fifth() {
    let (x, y) = toy_data(1000);
    let mut rng = StdRng::seed_from_u64(42);
    let split = split_train_test(&x, &y, 0.20, &mut rng).unwrap();

    assert_eq!(split.x_test.nrows(), 200);
    assert_eq!(split.y_test.len(), 200);
    assert_eq!(split.x_train.nrows(), 800);
    assert_eq!(split.y_train.len(), 800);
}

#[test]
fn same_seed_reproduces_the_same_partition() {
    let (x, y) = toy_data(100);
    let mut rng_a = StdRng::seed_from_u64(9);
    let mut rng_b = StdRng::seed_from_u64(9);
    let a = split_train_test(&x, &y, 0.25, &mut rng_a).unwrap();
    let b = split_train_test(&x, &y, 0.25, &mut rng_b).unwrap();

    assert_eq!(a.x_test, b.x_test);
    assert_eq!(a.x_train, b.x_train);
    assert_eq!(a.y_test, b.y_test);
}

#[test]
fn rows_stay_aligned_with_their_labels() {
    let (x, y) = toy_data(50);
    let mut rng = StdRng::seed_from_u64(3);
    let split = split_train_test(&x, &y, 0.2, &mut rng).unwrap();

    // Row i of toy_data has first feature 2*i and label i % 2.
    for r in 0..split.x_test.nrows() {
        let original_row = (split.x_test[(r, 0)] / 2.0) as usize;
        assert_eq!(split.y_test[r], (original_row % 2) as u8);
    }
    for r in 0..split.x_train.nrows() {
        let original_row = (split.x_train[(r, 0)] / 2.0) as usize;
        assert_eq!(split.y_train[r], (original_row % 2) as u8);
    }
}

#[test]
fn train_and_test_cover_all_rows_without_overlap() {
    let (x, y) = toy_data(40);
    let mut rng = StdRng::seed_from_u64(17);
    let split = split_train_test(&x, &y, 0.25, &mut rng).unwrap();

    let mut seen: Vec<usize> = (0..split.x_test.nrows())
        .map(|r| (split.x_test[(r, 0)] / 2.0) as usize)
        .chain((0..split.x_train.nrows()).map(|r| (split.x_train[(r, 0)] / 2.0) as usize))
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..40).collect::<Vec<_>>());
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn out_of_range_fraction_is_rejected() {
    let (x, y) = toy_data(10);
    for fraction in [0.0, 1.0, -0.2, 1.5] {
        let mut rng = StdRng::seed_from_u64(1);
        let result = split_train_test(&x, &y, fraction, &mut rng);
        assert!(
            matches!(result, Err(PipelineError::InvalidArgument { .. })),
            "fraction {} should be rejected",
            fraction
        );
    }
}

#[test]
fn mismatched_rows_and_labels_are_a_schema_violation() {
    let (x, _) = toy_data(10);
    let y = Array1::from(vec![0u8, 1, 0]);
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        split_train_test(&x, &y, 0.2, &mut rng),
        Err(PipelineError::SchemaMismatch { .. })
    ));
}

#[test]
fn single_class_labels_are_degenerate() {
    assert!(matches!(
        ensure_both_classes(&[0, 0, 0, 0]),
        Err(PipelineError::DegenerateTrainingSet {
            present_class: 0,
            rows: 4
        })
    ));
    assert!(matches!(
        ensure_both_classes(&[1, 1]),
        Err(PipelineError::DegenerateTrainingSet {
            present_class: 1,
            rows: 2
        })
    ));
    assert!(ensure_both_classes(&[0, 1]).is_ok());
}
