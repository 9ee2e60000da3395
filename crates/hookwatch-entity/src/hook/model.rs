//! Hook record entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use hookwatch_core::types::BranchRevisions;

/// Tracked state of the webhook registered for one repository.
///
/// One record exists per repository, created when a register action first
/// succeeds and removed when an unregister action succeeds. The record is
/// only ever modified through the store's atomic update, so concurrent
/// writers (the consistency engine, the usage tracker, action
/// implementations) cannot lose each other's changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookRecord {
    /// The hook's identifier on the hosting side, once known.
    pub remote_id: Option<u64>,
    /// The delivery URL the hook was created with.
    pub callback_url: Option<String>,
    /// Username that performed the registration.
    pub added_by: Option<String>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// Whether the hook is believed to be delivering events consistent with
    /// observed reality. Cleared by the consistency engine on a mismatch;
    /// set again by a confirmed delivery or an explicit re-baseline, never as
    /// a side effect of an unrelated field update.
    pub correct: bool,
    /// Last time the hook was externally confirmed to have fired.
    /// Monotone: an update only takes effect if it advances this value.
    pub last_used: Option<DateTime<Utc>>,
    /// Last branch-tip state known to have been correctly reflected by the
    /// hook. `None` means the baseline is unknown (for example after a cache
    /// wipe) and is distinct from an empty map.
    pub last_branch_revisions: Option<BranchRevisions>,
}

impl Default for HookRecord {
    fn default() -> Self {
        Self {
            remote_id: None,
            callback_url: None,
            added_by: None,
            created_at: Utc::now(),
            correct: true,
            last_used: None,
            last_branch_revisions: None,
        }
    }
}

impl HookRecord {
    /// Create the record for a hook that was just registered on the host.
    pub fn registered(
        remote_id: u64,
        callback_url: impl Into<String>,
        added_by: impl Into<String>,
    ) -> Self {
        Self {
            remote_id: Some(remote_id),
            callback_url: Some(callback_url.into()),
            added_by: Some(added_by.into()),
            ..Self::default()
        }
    }

    /// Check whether the hook was confirmed live within the given window.
    ///
    /// Used to suppress staleness alarms: a hook that fired recently is not
    /// reported as suspect even if its record currently says otherwise.
    pub fn used_within(&self, window: Duration, now: DateTime<Utc>) -> bool {
        self.last_used
            .map(|used| now.signed_duration_since(used) <= window)
            .unwrap_or(false)
    }
}
