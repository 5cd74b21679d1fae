use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PipelineError;

/// Central configuration for one pipeline run.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Population size.
    pub n_customers: usize,
    /// Master seed threaded through generation, splitting, and training.
    pub seed: u64,
    /// Fraction of rows held out for evaluation, in (0, 1).
    pub test_fraction: f64,
    pub logistic: ModelType,
    pub forest: ModelType,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            n_customers: 1000,
            seed: 42,
            test_fraction: 0.20,
            logistic: ModelType::default_logistic(),
            forest: ModelType::default_forest(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.n_customers == 0 {
            return Err(PipelineError::InvalidArgument {
                stage: "config",
                reason: "n_customers must be positive".to_string(),
            });
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(PipelineError::InvalidArgument {
                stage: "config",
                reason: format!(
                    "test_fraction must lie in (0, 1), got {}",
                    self.test_fraction
                ),
            });
        }
        Ok(())
    }
}

/// Supported model variants and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum ModelType {
    Logistic {
        learning_rate: f64,
        max_iter: usize,
        l2: f64,
        tolerance: f64,
    },
    RandomForest {
        n_trees: usize,
        max_depth: usize,
        min_samples_split: usize,
        /// Features considered per split. `None` uses sqrt(n_features).
        max_features: Option<usize>,
    },
}

impl ModelType {
    pub fn default_logistic() -> Self {
        ModelType::Logistic {
            learning_rate: 0.1,
            max_iter: 1000,
            l2: 1.0,
            tolerance: 1e-6,
        }
    }

    pub fn default_forest() -> Self {
        ModelType::RandomForest {
            n_trees: 100,
            max_depth: 16,
            min_samples_split: 2,
            max_features: None,
        }
    }
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::default_forest()
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logistic" | "logistic_regression" => Ok(ModelType::default_logistic()),
            "forest" | "random_forest" => Ok(ModelType::default_forest()),
            _ => Err(format!(
                "Unknown model type: {}. Expected 'logistic' or 'random_forest'",
                s
            )),
        }
    }
}
