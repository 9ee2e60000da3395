//! Hook domain entities.

pub mod model;
pub mod outcome;
pub mod remote;

pub use model::HookRecord;
pub use outcome::{RegisterOutcome, TestOutcome, UnregisterOutcome};
pub use remote::RemoteHook;
