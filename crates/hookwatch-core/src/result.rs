//! Result alias used across the HookWatch crates.

use crate::error::HookError;

/// Result type for fallible HookWatch operations.
///
/// Spares every signature from spelling out `Result<T, HookError>`.
pub type HookResult<T> = Result<T, HookError>;
