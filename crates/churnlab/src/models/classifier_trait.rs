use rand::rngs::StdRng;

use crate::error::PipelineError;
use crate::math::Array2;

/// Uniform contract shared by the two classifier variants so the evaluator
/// can treat them polymorphically. Exactly two implementations exist with no
/// shared code, so a trait object is all the polymorphism needed.
pub trait ChurnClassifier {
    /// Fit on the training partition. `y` is 1 for churn, 0 for stay. The
    /// rng is the explicitly threaded pipeline source; the logistic model
    /// ignores it, the forest draws its per-tree seeds from it.
    fn fit(&mut self, x: &Array2<f64>, y: &[u8], rng: &mut StdRng) -> Result<(), PipelineError>;

    /// Binary prediction per row over the encoded feature schema.
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<u8>, PipelineError>;

    /// Human readable model name used in reports and artifact filenames.
    fn name(&self) -> &'static str;

    /// Normalized per-feature contribution scores, for models that expose
    /// them. Positional against the encoder's fixed column order.
    fn feature_importances(&self) -> Option<Vec<f64>> {
        None
    }
}
