//! Repository-state change events.
//!
//! The revision event source (a VCS poller, a push-notification receiver,
//! whatever watches the repositories) publishes a [`RepoStateEvent`] on the
//! [`RepoStateBus`] whenever a tracked repository's branch tips change. The
//! publisher resolves clone URLs to [`RepoRef`]s and filters out repository
//! roots that cannot carry a hook *before* publishing; consumers only ever
//! see events for plausible repositories.

pub mod bus;

use serde::{Deserialize, Serialize};

use crate::types::{BranchRevisions, RepoRef};

pub use bus::RepoStateBus;

/// A change in a repository's set of branch-tip revisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoStateEvent {
    /// The repository whose state changed.
    pub repo: RepoRef,
    /// Branch tips before the change.
    pub old_revisions: BranchRevisions,
    /// Branch tips after the change.
    pub new_revisions: BranchRevisions,
}

impl RepoStateEvent {
    /// Create a new repository-state event.
    pub fn new(
        repo: RepoRef,
        old_revisions: BranchRevisions,
        new_revisions: BranchRevisions,
    ) -> Self {
        Self {
            repo,
            old_revisions,
            new_revisions,
        }
    }
}
