//! Delivery-confirmation tracking for registered hooks.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use hookwatch_core::result::HookResult;
use hookwatch_core::types::{BranchRevisions, RepoRef};

use crate::context::SharedHookStore;

/// Records the external evidence that a hook is alive and delivering.
///
/// Two signals arrive here: a confirmed delivery timestamp
/// ([`UsageTracker::record_usage`]) and the branch state a delivery carried
/// ([`UsageTracker::merge_branch_revisions`]). Both operate only on hooks
/// that are already tracked; neither ever creates a record.
#[derive(Debug, Clone)]
pub struct UsageTracker {
    store: SharedHookStore,
    liveness_window: Duration,
}

impl UsageTracker {
    /// Create a tracker over the shared hook store.
    pub fn new(store: SharedHookStore, liveness_window: Duration) -> Self {
        Self {
            store,
            liveness_window,
        }
    }

    /// Note that `repo`'s hook was confirmed to have fired at `at`.
    ///
    /// Only a strictly later timestamp advances `last_used`, and the same
    /// mutation marks the record `correct`: a hook that demonstrably
    /// delivered is working, whatever an older check concluded. The stored
    /// branch baseline is never touched here. Unknown repositories are
    /// ignored.
    pub async fn record_usage(&self, repo: &RepoRef, at: DateTime<Utc>) -> HookResult<()> {
        let Some(record) = self.store.get(repo).await? else {
            return Ok(());
        };
        // Usage lands on every delivery, so skip the store write when the
        // stored timestamp is already current.
        if !advances(record.last_used, at) {
            return Ok(());
        }

        self.store
            .update(
                repo,
                Box::new(move |current| {
                    current.map(|mut record| {
                        // The fast-path read may be stale; only the value the
                        // store hands the mutator is authoritative.
                        if advances(record.last_used, at) {
                            record.last_used = Some(at);
                            record.correct = true;
                        }
                        record
                    })
                }),
            )
            .await?;

        Ok(())
    }

    /// Fold branch tips carried by a confirmed delivery into the baseline.
    ///
    /// The delivery proves the hook works, so the record is marked `correct`
    /// and `observed` overlays the stored map: observed branches take the new
    /// revisions, branches only the baseline knows survive. A record with no
    /// baseline yet gets `observed` as its first one. Unknown repositories
    /// are ignored.
    pub async fn merge_branch_revisions(
        &self,
        repo: &RepoRef,
        observed: &BranchRevisions,
    ) -> HookResult<()> {
        if self.store.get(repo).await?.is_none() {
            return Ok(());
        }

        let observed = observed.clone();
        let branches = observed.len();
        self.store
            .update(
                repo,
                Box::new(move |current| {
                    current.map(|mut record| {
                        record.correct = true;
                        let baseline = record
                            .last_branch_revisions
                            .get_or_insert_with(BranchRevisions::new);
                        for (branch, revision) in observed {
                            baseline.insert(branch, revision);
                        }
                        record
                    })
                }),
            )
            .await?;
        debug!(repo = %repo, branches, "Merged branch revisions into baseline");

        Ok(())
    }

    /// Whether `repo`'s hook was confirmed live within the liveness window.
    pub async fn recently_used(&self, repo: &RepoRef) -> HookResult<bool> {
        let Some(record) = self.store.get(repo).await? else {
            return Ok(false);
        };
        Ok(record.used_within(self.liveness_window, Utc::now()))
    }
}

fn advances(stored: Option<DateTime<Utc>>, at: DateTime<Utc>) -> bool {
    stored.is_none_or(|last| last < at)
}
