//! Agreement metrics between held-out labels and model predictions.
//!
//! Everything is computed purely from the four confusion counts, with the
//! sklearn zero-denominator convention: precision, recall, and F1 fall back
//! to 0 when their denominators are 0.

use crate::error::PipelineError;
use crate::math::Array1;

/// 2x2 confusion counts. Churn (label 1) is the positive class; rows are
/// actual {stay, churn}, columns predicted {stay, churn}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_negative: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_positive: usize,
}

impl ConfusionMatrix {
    pub fn total(&self) -> usize {
        self.true_negative + self.false_positive + self.false_negative + self.true_positive
    }

    /// Counts as rows = actual {stay, churn}, columns = predicted
    /// {stay, churn} — the layout the confusion-matrix plot consumes.
    pub fn grid(&self) -> [[usize; 2]; 2] {
        [
            [self.true_negative, self.false_positive],
            [self.false_negative, self.true_positive],
        ]
    }
}

/// Per-class precision/recall/F1 plus the class row count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

impl ClassMetrics {
    fn from_counts(tp: usize, fp: usize, fn_count: usize) -> Self {
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_count);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        ClassMetrics {
            precision,
            recall,
            f1,
            support: tp + fn_count,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Evaluation of one model against the held-out labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub accuracy: f64,
    pub stay: ClassMetrics,
    pub churn: ClassMetrics,
    pub confusion: ConfusionMatrix,
}

/// Compare predictions to true labels over the held-out set.
pub fn evaluate(predictions: &[u8], labels: &Array1<u8>) -> Result<Evaluation, PipelineError> {
    if predictions.len() != labels.len() {
        return Err(PipelineError::SchemaMismatch {
            stage: "metrics::evaluate",
            detail: format!(
                "{} predictions but {} held-out labels",
                predictions.len(),
                labels.len()
            ),
        });
    }
    if predictions.is_empty() {
        return Err(PipelineError::InvalidArgument {
            stage: "metrics::evaluate",
            reason: "held-out set is empty".to_string(),
        });
    }

    let mut cm = ConfusionMatrix {
        true_negative: 0,
        false_positive: 0,
        false_negative: 0,
        true_positive: 0,
    };
    for (&pred, &actual) in predictions.iter().zip(labels.iter()) {
        match (actual, pred) {
            (0, 0) => cm.true_negative += 1,
            (0, _) => cm.false_positive += 1,
            (_, 0) => cm.false_negative += 1,
            _ => cm.true_positive += 1,
        }
    }

    let accuracy = (cm.true_positive + cm.true_negative) as f64 / cm.total() as f64;

    Ok(Evaluation {
        accuracy,
        // For the stay class the roles of the counts flip.
        stay: ClassMetrics::from_counts(cm.true_negative, cm.false_negative, cm.false_positive),
        churn: ClassMetrics::from_counts(cm.true_positive, cm.false_positive, cm.false_negative),
        confusion: cm,
    })
}

/// Pair importances with their feature names and sort ascending (least to
/// most important). The ascending order matches the downstream bar-chart
/// convention and is a contract, not an accident of computation.
pub fn rank_features(
    feature_names: &[String],
    importances: &[f64],
) -> Result<Vec<(String, f64)>, PipelineError> {
    if feature_names.len() != importances.len() {
        return Err(PipelineError::SchemaMismatch {
            stage: "metrics::rank_features",
            detail: format!(
                "{} feature names but {} importance scores",
                feature_names.len(),
                importances.len()
            ),
        });
    }

    let mut ranked: Vec<(String, f64)> = feature_names
        .iter()
        .cloned()
        .zip(importances.iter().copied())
        .collect();
    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    Ok(ranked)
}
