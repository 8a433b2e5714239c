//! Error taxonomy for workflow execution.
//!
//! Every failure value carries enough context (stage, index, route name) to
//! reproduce it without inspecting internal state.

use thiserror::Error;

use crate::models::Generation;

pub type FlowResult<T> = std::result::Result<T, FlowError>;

#[derive(Debug, Error)]
pub enum FlowError {
    /// The completion service failed or returned unparsable structured output.
    #[error("completion service failure: {0}")]
    Completion(String),

    /// A chain stage failed; the index identifies the stage.
    #[error("chain stage {index} failed: {source}")]
    ChainStage {
        index: usize,
        #[source]
        source: Box<FlowError>,
    },

    /// A routing decision named a branch outside the known set.
    #[error("unknown route '{route}' (known routes: {known:?}) for input: {input}")]
    UnknownRoute {
        route: String,
        known: Vec<String>,
        input: String,
    },

    /// A fan-out worker failed; the index identifies the triggering input.
    #[error("fan-out worker for input {index} failed: {source}")]
    FanOutWorker {
        index: usize,
        #[source]
        source: Box<FlowError>,
    },

    /// An external tool invocation failed.
    #[error("tool '{name}' failed: {cause}")]
    Tool { name: String, cause: String },

    /// The caller supplied an empty or otherwise invalid argument.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The refine loop aborted mid-run; the partial chain of thought is
    /// attached for diagnosis.
    #[error("refine loop aborted after {} generation(s): {}", .history.len(), .source)]
    RefineAborted {
        history: Vec<Generation>,
        #[source]
        source: Box<FlowError>,
    },

    /// The refine loop spent its attempt budget without a PASS verdict.
    #[error("refine loop exhausted {attempts} attempt(s) without acceptance")]
    RetriesExhausted {
        attempts: usize,
        history: Vec<Generation>,
    },
}

impl FlowError {
    pub fn completion(err: impl std::fmt::Display) -> Self {
        FlowError::Completion(err.to_string())
    }
}
