//! Consistency checking of observed repository state against tracked hooks.

pub mod engine;
pub mod verdict;

pub use engine::{ConsistencyEngine, EngineHandle};
pub use verdict::{BranchMismatch, ConsistencyVerdict};
