use crate::config::ModelType;
use crate::models::classifier_trait::ChurnClassifier;
use crate::models::forest::RandomForestClassifier;
use crate::models::logistic::LogisticClassifier;

/// Build a boxed classifier from a `ModelType`.
/// A thin factory implemented as a single function.
pub fn build_model(params: &ModelType) -> Box<dyn ChurnClassifier> {
    match params {
        ModelType::Logistic { .. } => Box::new(LogisticClassifier::new(params)),
        ModelType::RandomForest { .. } => Box::new(RandomForestClassifier::new(params)),
    }
}
