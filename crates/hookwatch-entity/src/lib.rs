//! # hookwatch-entity
//!
//! Domain entity models for HookWatch. Every struct in this crate represents
//! a stored record or a domain value object. All entities derive `Debug`,
//! `Clone`, `Serialize`, and `Deserialize`.

pub mod auth;
pub mod hook;
pub mod user;

pub use auth::AuthData;
pub use hook::{HookRecord, RegisterOutcome, RemoteHook, TestOutcome, UnregisterOutcome};
pub use user::ActingUser;
