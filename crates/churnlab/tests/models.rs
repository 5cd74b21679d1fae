//! Integration tests for the two classifier variants behind the shared
//! prediction contract.

use rand::rngs::StdRng;
use rand::SeedableRng;

use churnlab::config::ModelType;
use churnlab::error::PipelineError;
use churnlab::math::Array2;
use churnlab::models::classifier_trait::ChurnClassifier;
use churnlab::models::factory::build_model;

/// Two well-separated clusters: class 1 around (9, 9), class 0 around (1, 1).
fn separable() -> (Array2<f64>, Vec<u8>) {
    let mut data = Vec::new();
    let mut labels = Vec::new();
    for i in 0..20 {
        let jitter = (i % 5) as f64 * 0.1;
        if i < 10 {
            data.extend_from_slice(&[9.0 + jitter, 9.0 - jitter]);
            labels.push(1u8);
        } else {
            data.extend_from_slice(&[1.0 + jitter, 1.0 - jitter]);
            labels.push(0u8);
        }
    }
    (Array2::from_shape_vec((20, 2), data).unwrap(), labels)
}

// ---------------------------------------------------------------------------
// Shared contract
// ---------------------------------------------------------------------------

#[test]
fn factory_builds_both_variants() {
    let logistic = build_model(&ModelType::default_logistic());
    let forest = build_model(&ModelType::default_forest());
    assert_eq!(logistic.name(), "Logistic Regression");
    assert_eq!(forest.name(), "Random Forest");
}

#[test]
fn both_models_learn_the_separable_data() {
    let (x, y) = separable();
    for params in [ModelType::default_logistic(), ModelType::default_forest()] {
        let mut rng = StdRng::seed_from_u64(42);
        let mut model = build_model(&params);
        model.fit(&x, &y, &mut rng).unwrap();

        let predictions = model.predict(&x).unwrap();
        assert_eq!(predictions.len(), x.nrows());
        assert_eq!(predictions, y, "{} failed to separate", model.name());
    }
}

#[test]
fn only_the_forest_exposes_importances() {
    let (x, y) = separable();
    let mut rng = StdRng::seed_from_u64(42);

    let mut logistic = build_model(&ModelType::default_logistic());
    logistic.fit(&x, &y, &mut rng).unwrap();
    assert!(logistic.feature_importances().is_none());

    let mut forest = build_model(&ModelType::default_forest());
    forest.fit(&x, &y, &mut rng).unwrap();
    let importances = forest.feature_importances().unwrap();
    assert_eq!(importances.len(), 2);
    assert!(importances.iter().all(|&v| v >= 0.0));
    assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-9);
}

#[test]
fn degenerate_training_set_fails_for_both_models() {
    let x = Array2::from_shape_vec((4, 2), vec![1.0; 8]).unwrap();
    let y = vec![1u8, 1, 1, 1];
    for params in [ModelType::default_logistic(), ModelType::default_forest()] {
        let mut rng = StdRng::seed_from_u64(1);
        let mut model = build_model(&params);
        assert!(
            matches!(
                model.fit(&x, &y, &mut rng),
                Err(PipelineError::DegenerateTrainingSet { .. })
            ),
            "{} accepted a single-class training set",
            model.name()
        );
    }
}

#[test]
fn wrong_column_count_at_predict_is_a_schema_violation() {
    let (x, y) = separable();
    for params in [ModelType::default_logistic(), ModelType::default_forest()] {
        let mut rng = StdRng::seed_from_u64(42);
        let mut model = build_model(&params);
        model.fit(&x, &y, &mut rng).unwrap();

        let wrong = Array2::from_shape_vec((2, 3), vec![0.0; 6]).unwrap();
        assert!(
            matches!(
                model.predict(&wrong),
                Err(PipelineError::SchemaMismatch { .. })
            ),
            "{} accepted a 3-column matrix",
            model.name()
        );
    }
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn forest_training_is_deterministic_for_a_fixed_seed() {
    let (x, y) = separable();
    let probe = Array2::from_shape_vec(
        (4, 2),
        vec![5.0, 5.0, 2.0, 8.0, 8.0, 2.0, 4.9, 5.1],
    )
    .unwrap();

    let mut first: Option<(Vec<u8>, Vec<f64>)> = None;
    for _ in 0..2 {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut model = build_model(&ModelType::default_forest());
        model.fit(&x, &y, &mut rng).unwrap();
        let result = (
            model.predict(&probe).unwrap(),
            model.feature_importances().unwrap(),
        );
        match &first {
            None => first = Some(result),
            Some(expected) => assert_eq!(&result, expected),
        }
    }
}
