//! Hierarchical supervisor/worker engine.
//!
//! A supervisor decision picks a team each turn, a team router picks a
//! worker, and the turn loop applies the worker's output to the shared run
//! state. Two nested decision levels keep each router's branching factor
//! small, and the `RETURN` branch lets a team decline work without ending
//! the run.

pub mod agents;
pub mod team;

pub use agents::TeamAgents;
pub use team::TeamOrchestrator;
