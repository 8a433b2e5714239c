//! Data model shared by the workflow patterns.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output of a routing call: which branch to take next and why.
///
/// `next` must belong to the branch set known to the dispatching component;
/// `reason` is diagnostic only and is never branched on.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Decision {
    pub next: String,
    pub reason: String,
}

/// Result of invoking a worker. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerOutput {
    pub role: String,
    pub content: String,
}

impl WorkerOutput {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Run state for the hierarchical team.
///
/// Owned by exactly one run. `notes`, `citations` and `charts` only grow
/// within a run; `draft` is overwritten by the last writer. All mutation
/// happens in the turn loop, never in a worker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamState {
    pub goal: String,
    pub notes: Vec<String>,
    pub citations: Vec<String>,
    pub charts: Vec<String>,
    pub draft: String,
}

impl TeamState {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            ..Self::default()
        }
    }
}

/// One candidate produced by the generator in a refine loop.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Generation {
    pub thoughts: String,
    pub response: String,
}

/// Evaluator verdict over a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pass,
    NeedsImprovement,
    Fail,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::NeedsImprovement => write!(f, "NEEDS_IMPROVEMENT"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}

/// Structured output of one evaluator call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationResult {
    #[serde(alias = "evaluation")]
    pub verdict: Verdict,
    pub feedback: String,
}

/// Final output of a refine loop: the accepted solution plus the full
/// chain-of-thought history, in generation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinedResult {
    pub solution: String,
    pub history: Vec<Generation>,
}

/// One subtask produced by a task-decomposition call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Task {
    #[serde(alias = "type")]
    pub kind: String,
    pub description: String,
}

/// Structured output of the task-decomposition call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TaskPlan {
    pub analysis: String,
    pub tasks: Vec<Task>,
}

/// Final output of the orchestrator-workers pattern: the analysis plus one
/// worker response per subtask, in task order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorOutput {
    pub analysis: String,
    pub worker_responses: Vec<String>,
}

/// Terminal snapshot of a hierarchical team run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRunResult {
    pub draft: String,
    pub notes: Vec<String>,
    pub citations: Vec<String>,
    pub charts: Vec<String>,
    /// Turns consumed at termination.
    pub turns: usize,
}

impl TeamRunResult {
    pub fn from_state(state: TeamState, turns: usize) -> Self {
        Self {
            draft: state.draft,
            notes: state.notes,
            citations: state.citations,
            charts: state.charts,
            turns,
        }
    }
}
