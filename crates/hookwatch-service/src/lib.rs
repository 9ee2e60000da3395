//! # hookwatch-service
//!
//! Service layer for HookWatch. The consistency engine, usage tracker, and
//! action dispatcher each work against the shared hook store; the
//! [`WebhookManager`] facade wires them together over one context.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod actions;
pub mod consistency;
pub mod context;
pub mod dispatcher;
pub mod links;
pub mod manager;
pub mod usage;

pub use actions::HostActions;
pub use consistency::{BranchMismatch, ConsistencyEngine, ConsistencyVerdict, EngineHandle};
pub use context::{ActionContext, SharedAuthStore, SharedHookStore};
pub use dispatcher::ActionDispatcher;
pub use links::WebLinks;
pub use manager::WebhookManager;
pub use usage::UsageTracker;
