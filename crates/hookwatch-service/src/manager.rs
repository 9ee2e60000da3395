//! Facade wiring the dispatcher, consistency engine, and usage tracker
//! together over one shared context.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::warn;

use hookwatch_core::config::{AppConfig, HooksConfig};
use hookwatch_core::events::RepoStateBus;
use hookwatch_core::result::HookResult;
use hookwatch_core::types::{BranchRevisions, RepoRef};
use hookwatch_entity::{
    ActingUser, HookRecord, RegisterOutcome, RemoteHook, TestOutcome, UnregisterOutcome,
};
use hookwatch_store::open_store;

use crate::actions::HostActions;
use crate::consistency::{ConsistencyEngine, EngineHandle};
use crate::context::{ActionContext, SharedAuthStore, SharedHookStore};
use crate::dispatcher::ActionDispatcher;
use crate::links::WebLinks;
use crate::usage::UsageTracker;

/// The application-facing entry point for webhook tracking.
///
/// Owns an [`ActionDispatcher`] for host-side operations, a
/// [`ConsistencyEngine`] for verifying observed repository state, and a
/// [`UsageTracker`] for delivery confirmations, all over one shared
/// [`ActionContext`]. The engine's repository-state listener is started and
/// stopped explicitly through this facade.
#[derive(Debug)]
pub struct WebhookManager<C> {
    dispatcher: ActionDispatcher<C>,
    engine: ConsistencyEngine,
    tracker: UsageTracker,
    context: Arc<ActionContext>,
    listener: Mutex<Option<EngineHandle>>,
}

impl<C> WebhookManager<C>
where
    C: Send + Sync,
{
    /// Create a manager over an existing context.
    pub fn new(
        actions: Arc<dyn HostActions<C>>,
        context: Arc<ActionContext>,
        hooks: &HooksConfig,
    ) -> Self {
        let dispatcher = ActionDispatcher::new(actions, Arc::clone(&context));
        let engine = ConsistencyEngine::new(Arc::clone(&context.store));
        let tracker = UsageTracker::new(Arc::clone(&context.store), hooks.liveness_window());

        Self {
            dispatcher,
            engine,
            tracker,
            context,
            listener: Mutex::new(None),
        }
    }

    /// Create a manager with stores opened from configuration.
    pub async fn from_config(
        config: &AppConfig,
        actions: Arc<dyn HostActions<C>>,
        links: WebLinks,
    ) -> HookResult<Self> {
        let store: SharedHookStore = open_store(&config.store, "hooks").await?;
        let auth: SharedAuthStore = open_store(&config.store, "auth").await?;
        let context = Arc::new(ActionContext::new(store, auth, links));
        Ok(Self::new(actions, context, &config.hooks))
    }

    /// Start the repository-state listener on `bus`.
    ///
    /// Starting an already-started manager is a no-op that logs a warning.
    pub async fn start(&self, bus: &RepoStateBus) {
        let mut listener = self.listener.lock().await;
        if listener.is_some() {
            warn!("Repository-state listener already running; ignoring start");
            return;
        }
        *listener = Some(self.engine.start(bus));
    }

    /// Stop the repository-state listener and wait for it to finish.
    ///
    /// Stopping a stopped manager is a no-op.
    pub async fn stop(&self) {
        let mut listener = self.listener.lock().await;
        if let Some(handle) = listener.take() {
            handle.stop().await;
        }
    }

    /// Whether the repository-state listener is currently running.
    pub async fn is_running(&self) -> bool {
        self.listener.lock().await.is_some()
    }

    /// Ensure a webhook for `repo` exists on the host.
    pub async fn register(
        &self,
        repo: &RepoRef,
        client: &C,
        user: &ActingUser,
    ) -> HookResult<RegisterOutcome> {
        self.dispatcher.register(repo, client, user).await
    }

    /// Enumerate the webhooks present on the host for `repo`.
    pub async fn list_all(
        &self,
        repo: &RepoRef,
        client: &C,
        user: &ActingUser,
    ) -> HookResult<Vec<RemoteHook>> {
        self.dispatcher.list_all(repo, client, user).await
    }

    /// Remove the webhook for `repo` from the host.
    pub async fn unregister(
        &self,
        repo: &RepoRef,
        client: &C,
        user: &ActingUser,
    ) -> HookResult<UnregisterOutcome> {
        self.dispatcher.unregister(repo, client, user).await
    }

    /// Ask the host to emit a test delivery for `repo`'s webhook.
    pub async fn test(
        &self,
        repo: &RepoRef,
        client: &C,
        user: &ActingUser,
    ) -> HookResult<TestOutcome> {
        self.dispatcher.test(repo, client, user).await
    }

    /// Note that `repo`'s hook was confirmed to have fired at `at`.
    pub async fn record_usage(&self, repo: &RepoRef, at: DateTime<Utc>) -> HookResult<()> {
        self.tracker.record_usage(repo, at).await
    }

    /// Fold branch tips carried by a confirmed delivery into the baseline.
    pub async fn merge_branch_revisions(
        &self,
        repo: &RepoRef,
        observed: &BranchRevisions,
    ) -> HookResult<()> {
        self.tracker.merge_branch_revisions(repo, observed).await
    }

    /// Whether `repo`'s hook was confirmed live within the liveness window.
    pub async fn recently_used(&self, repo: &RepoRef) -> HookResult<bool> {
        self.tracker.recently_used(repo).await
    }

    /// Snapshot of every hook currently flagged as not correct.
    pub async fn incorrect_hooks(&self) -> HookResult<Vec<(RepoRef, HookRecord)>> {
        self.context
            .store
            .list_where(&|record| !record.correct)
            .await
    }

    /// Whether any tracked hook is currently flagged as not correct.
    pub async fn has_incorrect_hooks(&self) -> HookResult<bool> {
        Ok(!self.incorrect_hooks().await?.is_empty())
    }

    /// The consistency engine, for callers that drive checks directly.
    pub fn engine(&self) -> &ConsistencyEngine {
        &self.engine
    }

    /// The usage tracker.
    pub fn tracker(&self) -> &UsageTracker {
        &self.tracker
    }

    /// The context shared with action implementations.
    pub fn context(&self) -> &ActionContext {
        &self.context
    }
}
