//! Orchestration primitives for driving a text-completion model through
//! multi-step workflows:
//! - Sequential prompt chaining
//! - Content-based routing
//! - Parallel fan-out/fan-in
//! - Generate-evaluate refine loops
//! - Task decomposition with per-subtask workers
//! - Hierarchical supervisor/worker teams
//!
//! All patterns talk to the model through [`provider::LLMProvider`] and
//! report failures through [`error::FlowError`].

pub mod config;
pub mod error;
pub mod extract;
pub mod hierarchy;
pub mod models;
pub mod prompts;
pub mod provider;
pub mod telemetry;
pub mod tools;
pub mod util;
pub mod workflows;

// Re-exports for convenience
pub use error::{FlowError, FlowResult};
pub use hierarchy::{TeamAgents, TeamOrchestrator};
pub use provider::LLMProvider;
pub use workflows::{Chain, FanOut, RefineLoop, Router, TaskOrchestrator};
