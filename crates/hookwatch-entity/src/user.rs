//! Acting user identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The user on whose behalf a hook lifecycle operation runs.
///
/// Passed through to action implementations so the hosting side sees the
/// right credential and so access-denied errors can name who was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingUser {
    /// Internal user identifier.
    pub id: Uuid,
    /// Username as known to the hosting server.
    pub username: String,
}

impl ActingUser {
    /// Create an acting user.
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

impl fmt::Display for ActingUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}
