//! Reusable control-flow patterns over a completion service.
//!
//! Each pattern turns one or more model calls into a structured, bounded
//! operation: sequential chaining, content-based routing, parallel fan-out,
//! generate-evaluate refinement, and task decomposition with per-subtask
//! workers.

pub mod chain;
pub mod evaluator;
pub mod orchestrator;
pub mod parallel;
pub mod routing;

pub use chain::Chain;
pub use evaluator::RefineLoop;
pub use orchestrator::TaskOrchestrator;
pub use parallel::FanOut;
pub use routing::Router;
