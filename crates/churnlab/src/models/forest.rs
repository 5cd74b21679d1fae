//! Random-forest classifier: a fixed-size forest of CART decision trees
//! trained on bootstrap resamples with a random feature subset per split,
//! predicting by majority vote.
//!
//! Each tree gets its own seed pre-drawn sequentially from the pipeline rng,
//! so training is deterministic for a fixed seed no matter how rayon
//! schedules the trees. Importances are mean impurity reduction per feature
//! across the forest, normalized to sum to 1.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::ModelType;
use crate::data_handling::ensure_both_classes;
use crate::error::PipelineError;
use crate::math::Array2;
use crate::models::classifier_trait::ChurnClassifier;

pub struct RandomForestClassifier {
    n_trees: usize,
    max_depth: usize,
    min_samples_split: usize,
    max_features: Option<usize>,
    trees: Vec<DecisionTree>,
    importances: Vec<f64>,
    n_features: usize,
}

impl RandomForestClassifier {
    pub fn new(params: &ModelType) -> Self {
        match params {
            ModelType::RandomForest {
                n_trees,
                max_depth,
                min_samples_split,
                max_features,
            } => RandomForestClassifier {
                n_trees: *n_trees,
                max_depth: *max_depth,
                min_samples_split: *min_samples_split,
                max_features: *max_features,
                trees: Vec::new(),
                importances: Vec::new(),
                n_features: 0,
            },
            other => panic!("expected ModelType::RandomForest params, got {:?}", other),
        }
    }
}

impl ChurnClassifier for RandomForestClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[u8], rng: &mut StdRng) -> Result<(), PipelineError> {
        if x.nrows() != y.len() {
            return Err(PipelineError::SchemaMismatch {
                stage: "forest::fit",
                detail: format!("{} feature rows but {} labels", x.nrows(), y.len()),
            });
        }
        ensure_both_classes(y)?;

        let n_features = x.ncols();
        let params = TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split.max(2),
            max_features: self
                .max_features
                .unwrap_or_else(|| (n_features as f64).sqrt() as usize)
                .clamp(1, n_features),
        };

        // Per-tree seeds are drawn sequentially from the pipeline rng before
        // any parallel work starts, keeping the forest reproducible.
        let seeds: Vec<u64> = (0..self.n_trees).map(|_| rng.gen()).collect();

        let grown: Vec<(DecisionTree, Vec<f64>)> = seeds
            .par_iter()
            .map(|&seed| {
                let mut tree_rng = StdRng::seed_from_u64(seed);
                grow_tree(x, y, &params, &mut tree_rng)
            })
            .collect();

        let mut importances = vec![0.0f64; n_features];
        let mut trees = Vec::with_capacity(grown.len());
        for (tree, tree_importance) in grown {
            for (total, part) in importances.iter_mut().zip(tree_importance.iter()) {
                *total += part;
            }
            trees.push(tree);
        }

        let sum: f64 = importances.iter().sum();
        if sum > 0.0 {
            for v in importances.iter_mut() {
                *v /= sum;
            }
        } else {
            // No tree found a useful split; fall back to a flat ranking so
            // the sum-to-one contract still holds.
            let flat = 1.0 / n_features as f64;
            importances.iter_mut().for_each(|v| *v = flat);
        }

        self.trees = trees;
        self.importances = importances;
        self.n_features = n_features;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<u8>, PipelineError> {
        if self.trees.is_empty() {
            return Err(PipelineError::SchemaMismatch {
                stage: "forest::predict",
                detail: "predict called before fit".to_string(),
            });
        }
        if x.ncols() != self.n_features {
            return Err(PipelineError::SchemaMismatch {
                stage: "forest::predict",
                detail: format!(
                    "expected {} feature columns, found {}",
                    self.n_features,
                    x.ncols()
                ),
            });
        }

        Ok((0..x.nrows())
            .map(|r| {
                let row = x.row_slice(r);
                let churn_votes = self
                    .trees
                    .iter()
                    .filter(|tree| tree.predict_row(row) == 1)
                    .count();
                u8::from(churn_votes * 2 > self.trees.len())
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "Random Forest"
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        if self.importances.is_empty() {
            None
        } else {
            Some(self.importances.clone())
        }
    }
}

struct TreeParams {
    max_depth: usize,
    min_samples_split: usize,
    max_features: usize,
}

struct DecisionTree {
    root: Node,
}

enum Node {
    Leaf {
        class: u8,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl DecisionTree {
    fn predict_row(&self, row: &[f64]) -> u8 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

/// Grow one tree on a bootstrap resample. Returns the tree and its
/// (unnormalized) impurity-decrease importance per feature.
fn grow_tree(
    x: &Array2<f64>,
    y: &[u8],
    params: &TreeParams,
    rng: &mut StdRng,
) -> (DecisionTree, Vec<f64>) {
    let n = x.nrows();
    let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
    let mut importances = vec![0.0f64; x.ncols()];
    let root = grow_node(x, y, &bootstrap, 0, params, rng, &mut importances, n as f64);
    (DecisionTree { root }, importances)
}

#[allow(clippy::too_many_arguments)]
fn grow_node(
    x: &Array2<f64>,
    y: &[u8],
    indices: &[usize],
    depth: usize,
    params: &TreeParams,
    rng: &mut StdRng,
    importances: &mut [f64],
    total_rows: f64,
) -> Node {
    let churners = indices.iter().filter(|&&i| y[i] == 1).count();
    let node_size = indices.len();

    if churners == 0 || churners == node_size {
        return Node::Leaf {
            class: u8::from(churners > 0),
        };
    }
    if depth >= params.max_depth || node_size < params.min_samples_split {
        return majority_leaf(churners, node_size);
    }

    let parent_gini = gini(churners, node_size);

    // Random feature subset for this split.
    let mut candidates: Vec<usize> = (0..x.ncols()).collect();
    candidates.shuffle(rng);
    candidates.truncate(params.max_features);

    let mut best: Option<(usize, f64, f64)> = None; // (feature, threshold, gain)
    for &feature in &candidates {
        if let Some((threshold, gain)) =
            best_split_for_feature(x, y, indices, feature, parent_gini)
        {
            if best.map_or(true, |(_, _, g)| gain > g) {
                best = Some((feature, threshold, gain));
            }
        }
    }

    let Some((feature, threshold, gain)) = best else {
        return majority_leaf(churners, node_size);
    };

    importances[feature] += (node_size as f64 / total_rows) * gain;

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| x[(i, feature)] <= threshold);

    let left = grow_node(
        x, y, &left_idx, depth + 1, params, rng, importances, total_rows,
    );
    let right = grow_node(
        x, y, &right_idx, depth + 1, params, rng, importances, total_rows,
    );

    Node::Split {
        feature,
        threshold,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn majority_leaf(churners: usize, node_size: usize) -> Node {
    Node::Leaf {
        class: u8::from(churners * 2 > node_size),
    }
}

/// Best midpoint threshold for one feature by Gini gain, or `None` when no
/// split improves on the parent impurity.
fn best_split_for_feature(
    x: &Array2<f64>,
    y: &[u8],
    indices: &[usize],
    feature: usize,
    parent_gini: f64,
) -> Option<(f64, f64)> {
    let mut values: Vec<(f64, u8)> = indices.iter().map(|&i| (x[(i, feature)], y[i])).collect();
    values.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let n = values.len();
    let total_churn = values.iter().filter(|(_, label)| *label == 1).count();

    let mut best: Option<(f64, f64)> = None;
    let mut left_churn = 0usize;
    for i in 1..n {
        if values[i - 1].1 == 1 {
            left_churn += 1;
        }
        // Only cut between distinct feature values.
        if values[i].0 <= values[i - 1].0 {
            continue;
        }

        let left_n = i;
        let right_n = n - i;
        let right_churn = total_churn - left_churn;

        let weighted = (left_n as f64 / n as f64) * gini(left_churn, left_n)
            + (right_n as f64 / n as f64) * gini(right_churn, right_n);
        let gain = parent_gini - weighted;

        if gain > 1e-12 && best.map_or(true, |(_, g)| gain > g) {
            let threshold = (values[i - 1].0 + values[i].0) / 2.0;
            best = Some((threshold, gain));
        }
    }
    best
}

fn gini(churners: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = churners as f64 / total as f64;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gini_of_pure_and_mixed_nodes() {
        assert_eq!(gini(0, 10), 0.0);
        assert_eq!(gini(10, 10), 0.0);
        assert!((gini(5, 10) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn separable_data_is_learned() {
        let x = Array2::from_shape_vec(
            (8, 2),
            vec![
                9.0, 1.0, 8.5, 0.5, 9.5, 1.5, 8.0, 1.0, // class 1
                1.0, 1.0, 0.5, 0.5, 1.5, 1.5, 2.0, 1.0, // class 0
            ],
        )
        .unwrap();
        let y = vec![1u8, 1, 1, 1, 0, 0, 0, 0];

        let mut rng = StdRng::seed_from_u64(3);
        let mut model = RandomForestClassifier::new(&ModelType::RandomForest {
            n_trees: 25,
            max_depth: 8,
            min_samples_split: 2,
            max_features: None,
        });
        model.fit(&x, &y, &mut rng).unwrap();

        assert_eq!(model.predict(&x).unwrap(), y);

        let importances = model.feature_importances().unwrap();
        assert_eq!(importances.len(), 2);
        let sum: f64 = importances.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "importances sum to {}", sum);
        // The first feature carries the signal.
        assert!(importances[0] > importances[1]);
    }

    #[test]
    fn single_class_training_set_is_rejected() {
        let x = Array2::from_shape_vec((3, 1), vec![1.0, 2.0, 3.0]).unwrap();
        let y = vec![0u8, 0, 0];
        let mut rng = StdRng::seed_from_u64(1);
        let mut model = RandomForestClassifier::new(&ModelType::default_forest());
        assert!(matches!(
            model.fit(&x, &y, &mut rng),
            Err(PipelineError::DegenerateTrainingSet { present_class: 0, rows: 3 })
        ));
    }
}
