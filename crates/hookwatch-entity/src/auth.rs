//! Per-hook callback credentials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hookwatch_core::types::RepoRef;

/// Credential minted for one webhook registration.
///
/// The token ends up in the hook's callback URL so that incoming deliveries
/// can be matched back to the repository they were registered for; the secret
/// is handed to the hosting side for payload signing. Stored in its own
/// record store keyed by token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthData {
    /// Public token embedded in the callback URL.
    pub token: Uuid,
    /// Shared secret given to the hosting side.
    pub secret: String,
    /// The repository this credential was minted for.
    pub repo: RepoRef,
    /// When the credential was created.
    pub created_at: DateTime<Utc>,
}

impl AuthData {
    /// Mint a fresh credential for a repository.
    pub fn generate(repo: RepoRef) -> Self {
        Self {
            token: Uuid::new_v4(),
            secret: Uuid::new_v4().simple().to_string(),
            repo,
            created_at: Utc::now(),
        }
    }
}
