//! # hookwatch-core
//!
//! Core crate for HookWatch. Contains the record-store trait, configuration
//! schemas, repository identity types, repository-state events, and the
//! unified error taxonomy.
//!
//! Everything else in the workspace depends on this crate; it depends on
//! **no** other HookWatch crate.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::HookError;
pub use result::HookResult;
