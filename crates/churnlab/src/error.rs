use std::error::Error;
use std::fmt;

/// Failures surfaced by the pipeline. Nothing is retried: a run is a single
/// deterministic pass, so a failure names the stage and invariant and aborts.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Caller-supplied input was out of range (non-positive population size,
    /// test fraction outside (0, 1)).
    InvalidArgument {
        stage: &'static str,
        reason: String,
    },
    /// The training partition realized only one of the two classes, which
    /// can happen for small populations or extreme seeds. Training aborts
    /// rather than returning a trivial classifier.
    DegenerateTrainingSet { present_class: u8, rows: usize },
    /// The feature schema handed to a model or the evaluator does not match
    /// the fixed column contract. A programming error, not user input.
    SchemaMismatch {
        stage: &'static str,
        detail: String,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PipelineError::InvalidArgument { stage, reason } => {
                write!(f, "invalid argument at {}: {}", stage, reason)
            }
            PipelineError::DegenerateTrainingSet {
                present_class,
                rows,
            } => write!(
                f,
                "degenerate training set: all {} rows belong to class {}",
                rows, present_class
            ),
            PipelineError::SchemaMismatch { stage, detail } => {
                write!(f, "schema contract violated at {}: {}", stage, detail)
            }
        }
    }
}

impl Error for PipelineError {}
