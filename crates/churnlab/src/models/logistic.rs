//! Logistic-regression classifier: an L2-regularized linear decision
//! boundary fit by batch gradient descent until convergence or the
//! iteration cap.

use rand::rngs::StdRng;

use crate::config::ModelType;
use crate::data_handling::ensure_both_classes;
use crate::error::PipelineError;
use crate::math::Array2;
use crate::models::classifier_trait::ChurnClassifier;
use crate::preprocessing::{fit_scaler, transform_all, Scaler};

pub struct LogisticClassifier {
    learning_rate: f64,
    max_iter: usize,
    l2: f64,
    tolerance: f64,
    weights: Vec<f64>,
    bias: f64,
    scaler: Option<Scaler>,
}

impl LogisticClassifier {
    pub fn new(params: &ModelType) -> Self {
        match params {
            ModelType::Logistic {
                learning_rate,
                max_iter,
                l2,
                tolerance,
            } => LogisticClassifier {
                learning_rate: *learning_rate,
                max_iter: *max_iter,
                l2: *l2,
                tolerance: *tolerance,
                weights: Vec::new(),
                bias: 0.0,
                scaler: None,
            },
            other => panic!("expected ModelType::Logistic params, got {:?}", other),
        }
    }

    fn decision(&self, row: &[f64]) -> f64 {
        let z: f64 = row
            .iter()
            .zip(self.weights.iter())
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.bias;
        sigmoid(z)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl ChurnClassifier for LogisticClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[u8], _rng: &mut StdRng) -> Result<(), PipelineError> {
        if x.nrows() != y.len() {
            return Err(PipelineError::SchemaMismatch {
                stage: "logistic::fit",
                detail: format!("{} feature rows but {} labels", x.nrows(), y.len()),
            });
        }
        ensure_both_classes(y)?;

        let scaler = fit_scaler(x);
        let xs = transform_all(x, &scaler);
        let (n_rows, n_cols) = xs.shape();
        let n = n_rows as f64;

        self.weights = vec![0.0; n_cols];
        self.bias = 0.0;

        for iter in 0..self.max_iter {
            let mut grad_w = vec![0.0f64; n_cols];
            let mut grad_b = 0.0f64;

            for r in 0..n_rows {
                let row = xs.row_slice(r);
                let err = self.decision(row) - y[r] as f64;
                for (g, xv) in grad_w.iter_mut().zip(row.iter()) {
                    *g += err * xv;
                }
                grad_b += err;
            }

            let mut max_step = 0.0f64;
            for (w, g) in self.weights.iter_mut().zip(grad_w.iter()) {
                let step = (g + self.l2 * *w) / n;
                *w -= self.learning_rate * step;
                max_step = max_step.max(step.abs());
            }
            let bias_step = grad_b / n;
            self.bias -= self.learning_rate * bias_step;
            max_step = max_step.max(bias_step.abs());

            if max_step < self.tolerance {
                log::debug!("logistic regression converged after {} iterations", iter + 1);
                break;
            }
        }

        self.scaler = Some(scaler);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<u8>, PipelineError> {
        let scaler = self.scaler.as_ref().ok_or(PipelineError::SchemaMismatch {
            stage: "logistic::predict",
            detail: "predict called before fit".to_string(),
        })?;
        if x.ncols() != self.weights.len() {
            return Err(PipelineError::SchemaMismatch {
                stage: "logistic::predict",
                detail: format!(
                    "expected {} feature columns, found {}",
                    self.weights.len(),
                    x.ncols()
                ),
            });
        }

        let xs = transform_all(x, scaler);
        Ok((0..xs.nrows())
            .map(|r| u8::from(self.decision(xs.row_slice(r)) >= 0.5))
            .collect())
    }

    fn name(&self) -> &'static str {
        "Logistic Regression"
    }
}
