//! The consistency engine and its repository-event listener.

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use hookwatch_core::events::RepoStateBus;
use hookwatch_core::result::HookResult;
use hookwatch_core::types::{BranchRevisions, RepoRef};

use crate::consistency::verdict::{BranchMismatch, ConsistencyVerdict};
use crate::context::SharedHookStore;

/// Checks observed branch state against each hook's stored baseline.
///
/// A hook whose repository shows a branch the baseline does not know, or a
/// branch whose tip differs from the stored revision, has missed at least one
/// delivery; the engine flags its record as not `correct`. The baseline
/// itself is only written here when none exists yet: a flagged record keeps
/// its old baseline so the divergence stays diagnosable.
#[derive(Debug, Clone)]
pub struct ConsistencyEngine {
    store: SharedHookStore,
}

impl ConsistencyEngine {
    /// Create an engine over the shared hook store.
    pub fn new(store: SharedHookStore) -> Self {
        Self { store }
    }

    /// Check one repository's observed branch tips against its tracked hook.
    ///
    /// Outcomes:
    /// - no record tracked: [`ConsistencyVerdict::Untracked`], nothing written;
    /// - no baseline stored yet: adopt a copy of `observed` as the baseline
    ///   and report [`ConsistencyVerdict::Consistent`] (`correct` untouched);
    /// - a branch missing from the baseline or stored with a different
    ///   revision: flag the record (`correct = false`, baseline preserved)
    ///   and report the first such [`BranchMismatch`];
    /// - full agreement: [`ConsistencyVerdict::Consistent`], nothing written.
    pub async fn check_consistency(
        &self,
        repo: &RepoRef,
        observed: &BranchRevisions,
    ) -> HookResult<ConsistencyVerdict> {
        let Some(record) = self.store.get(repo).await? else {
            return Ok(ConsistencyVerdict::Untracked);
        };

        let Some(baseline) = record.last_branch_revisions else {
            let adopted = observed.clone();
            self.store
                .update(
                    repo,
                    Box::new(move |current| {
                        current.map(|mut record| {
                            // Keep a baseline installed by a concurrent
                            // writer in the meantime.
                            record.last_branch_revisions.get_or_insert(adopted);
                            record
                        })
                    }),
                )
                .await?;
            debug!(
                repo = %repo,
                branches = observed.len(),
                "Adopted branch revision baseline"
            );
            return Ok(ConsistencyVerdict::Consistent);
        };

        let Some(mismatch) = first_mismatch(&baseline, observed) else {
            return Ok(ConsistencyVerdict::Consistent);
        };

        match mismatch.found.as_deref() {
            Some(found) => warn!(
                repo = %repo,
                branch = %mismatch.branch,
                expected = %mismatch.expected,
                found,
                "Incorrect revision stored for branch"
            ),
            None => warn!(
                repo = %repo,
                branch = %mismatch.branch,
                expected = %mismatch.expected,
                "No revision stored for branch, but one should be"
            ),
        }

        self.store
            .update(
                repo,
                Box::new(|current| {
                    current.map(|mut record| {
                        record.correct = false;
                        record
                    })
                }),
            )
            .await?;

        Ok(ConsistencyVerdict::Inconsistent(mismatch))
    }

    /// Subscribe to the bus and spawn the listener task.
    ///
    /// Each received event drives [`ConsistencyEngine::check_consistency`]
    /// for its repository. Store failures are logged and the listener keeps
    /// going; a receiver that lags behind the bus drops the oldest events and
    /// logs how many were missed. On shutdown the listener drains events
    /// already in the channel before exiting, so everything published before
    /// [`EngineHandle::stop`] gets checked.
    pub fn start(&self, bus: &RepoStateBus) -> EngineHandle {
        let mut events = bus.subscribe();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let engine = self.clone();

        let task = tokio::spawn(async move {
            info!("Consistency listener started");
            loop {
                tokio::select! {
                    // Also trips when the handle is dropped without stop().
                    _ = shutdown_rx.changed() => {
                        info!("Consistency listener received shutdown signal");
                        break;
                    }
                    received = events.recv() => match received {
                        Ok(event) => engine.check_event(&event.repo, &event.new_revisions).await,
                        Err(RecvError::Lagged(missed)) => {
                            warn!(missed, "Consistency listener lagged behind repository events");
                        }
                        Err(RecvError::Closed) => {
                            info!("Repository event bus closed, stopping consistency listener");
                            break;
                        }
                    }
                }
            }

            loop {
                match events.try_recv() {
                    Ok(event) => engine.check_event(&event.repo, &event.new_revisions).await,
                    Err(TryRecvError::Lagged(missed)) => {
                        warn!(missed, "Consistency listener lagged behind repository events");
                    }
                    Err(_) => break,
                }
            }
            info!("Consistency listener stopped");
        });

        EngineHandle {
            shutdown: shutdown_tx,
            task,
        }
    }

    /// Run one check from the listener, downgrading failures to log lines.
    async fn check_event(&self, repo: &RepoRef, observed: &BranchRevisions) {
        if let Err(err) = self.check_consistency(repo, observed).await {
            error!(
                repo = %repo,
                kind = err.kind(),
                error = %err,
                "Consistency check failed"
            );
        }
    }
}

/// Handle to a running consistency listener.
#[derive(Debug)]
pub struct EngineHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl EngineHandle {
    /// Signal the listener to stop and wait for it to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(err) = self.task.await {
            error!(error = %err, "Consistency listener task failed to shut down cleanly");
        }
    }
}

/// Find the first observed branch disagreeing with the baseline.
///
/// Observed maps iterate in branch-name order, so "first" is deterministic
/// for a given observation. Branches present in the baseline but absent from
/// the observation are not examined; only observed state can testify.
fn first_mismatch(baseline: &BranchRevisions, observed: &BranchRevisions) -> Option<BranchMismatch> {
    for (branch, revision) in observed {
        match baseline.get(branch) {
            None => {
                return Some(BranchMismatch {
                    branch: branch.clone(),
                    expected: revision.clone(),
                    found: None,
                });
            }
            Some(stored) if stored != revision => {
                return Some(BranchMismatch {
                    branch: branch.clone(),
                    expected: revision.clone(),
                    found: Some(stored.clone()),
                });
            }
            Some(_) => {}
        }
    }
    None
}
