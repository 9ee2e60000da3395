//! Uniform entry point for the pluggable host actions.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use hookwatch_core::result::HookResult;
use hookwatch_core::types::RepoRef;
use hookwatch_entity::{ActingUser, RegisterOutcome, RemoteHook, TestOutcome, UnregisterOutcome};

use crate::actions::HostActions;
use crate::context::ActionContext;

/// Dispatches webhook operations to the configured [`HostActions`]
/// implementation.
///
/// Every call is forwarded unchanged together with the shared
/// [`ActionContext`]. The dispatcher adds structured logging keyed by
/// [`hookwatch_core::error::HookError::kind`] and nothing else: outcomes and
/// errors pass through untouched, and a failed action is never retried here.
pub struct ActionDispatcher<C> {
    actions: Arc<dyn HostActions<C>>,
    context: Arc<ActionContext>,
}

impl<C> ActionDispatcher<C>
where
    C: Send + Sync,
{
    /// Create a dispatcher over an action implementation and its context.
    pub fn new(actions: Arc<dyn HostActions<C>>, context: Arc<ActionContext>) -> Self {
        Self { actions, context }
    }

    /// The context shared with every action call.
    pub fn context(&self) -> &ActionContext {
        &self.context
    }

    /// Ensure a webhook for `repo` exists on the host.
    pub async fn register(
        &self,
        repo: &RepoRef,
        client: &C,
        user: &ActingUser,
    ) -> HookResult<RegisterOutcome> {
        match self.actions.register(repo, client, user, &self.context).await {
            Ok(outcome) => {
                info!(
                    repo = %repo,
                    user = %user,
                    outcome = ?outcome,
                    "Webhook register completed"
                );
                Ok(outcome)
            }
            Err(err) => {
                warn!(
                    repo = %repo,
                    user = %user,
                    kind = err.kind(),
                    error = %err,
                    "Webhook register failed"
                );
                Err(err)
            }
        }
    }

    /// Enumerate the webhooks present on the host for `repo`.
    pub async fn list_all(
        &self,
        repo: &RepoRef,
        client: &C,
        user: &ActingUser,
    ) -> HookResult<Vec<RemoteHook>> {
        match self.actions.list_all(repo, client, user, &self.context).await {
            Ok(hooks) => {
                info!(
                    repo = %repo,
                    user = %user,
                    count = hooks.len(),
                    "Webhook listing completed"
                );
                Ok(hooks)
            }
            Err(err) => {
                warn!(
                    repo = %repo,
                    user = %user,
                    kind = err.kind(),
                    error = %err,
                    "Webhook listing failed"
                );
                Err(err)
            }
        }
    }

    /// Remove the webhook for `repo` from the host.
    pub async fn unregister(
        &self,
        repo: &RepoRef,
        client: &C,
        user: &ActingUser,
    ) -> HookResult<UnregisterOutcome> {
        match self
            .actions
            .unregister(repo, client, user, &self.context)
            .await
        {
            Ok(outcome) => {
                info!(
                    repo = %repo,
                    user = %user,
                    outcome = ?outcome,
                    "Webhook unregister completed"
                );
                Ok(outcome)
            }
            Err(err) => {
                warn!(
                    repo = %repo,
                    user = %user,
                    kind = err.kind(),
                    error = %err,
                    "Webhook unregister failed"
                );
                Err(err)
            }
        }
    }

    /// Ask the host to emit a test delivery for `repo`'s webhook.
    pub async fn test(
        &self,
        repo: &RepoRef,
        client: &C,
        user: &ActingUser,
    ) -> HookResult<TestOutcome> {
        match self.actions.test(repo, client, user, &self.context).await {
            Ok(outcome) => {
                info!(
                    repo = %repo,
                    user = %user,
                    outcome = ?outcome,
                    "Webhook test delivery requested"
                );
                Ok(outcome)
            }
            Err(err) => {
                warn!(
                    repo = %repo,
                    user = %user,
                    kind = err.kind(),
                    error = %err,
                    "Webhook test delivery failed"
                );
                Err(err)
            }
        }
    }
}

impl<C> Clone for ActionDispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            actions: Arc::clone(&self.actions),
            context: Arc::clone(&self.context),
        }
    }
}

impl<C> fmt::Debug for ActionDispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
