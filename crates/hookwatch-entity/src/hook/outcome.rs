//! Operation outcomes for hook lifecycle actions.
//!
//! Closed enums rather than booleans: each action reports exactly what
//! happened on the hosting side. Failures (transport, remote rejection,
//! access denied) are errors, not outcome variants; an outcome always
//! describes a call that completed.

use serde::{Deserialize, Serialize};

/// Outcome of registering a webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegisterOutcome {
    /// A new hook was created on the hosting side.
    Created,
    /// A matching hook already existed; nothing was created.
    AlreadyExists,
}

/// Outcome of unregistering a webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnregisterOutcome {
    /// The hook was removed from the hosting side.
    Removed,
    /// No matching hook existed; nothing was removed.
    NeverExisted,
}

/// Outcome of asking the hosting side to fire a test delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestOutcome {
    /// The host accepted the test-delivery request.
    Delivered,
    /// No hook exists for the repository, so there was nothing to test.
    NoHook,
}
