//! Shared fixtures for the integration suite.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use hookwatch_core::config::HooksConfig;
use hookwatch_core::result::HookResult;
use hookwatch_core::types::{BranchRevisions, RepoRef};
use hookwatch_entity::{
    ActingUser, AuthData, HookRecord, RegisterOutcome, RemoteHook, TestOutcome, UnregisterOutcome,
};
use hookwatch_service::{ActionContext, HostActions, WebLinks, WebhookManager};
use hookwatch_store::MemoryStore;

/// Stand-in for an authenticated hosting-API client.
#[derive(Debug, Clone, Default)]
pub struct StubHost;

/// Action implementation that services every call from the context stores.
///
/// Register mints a credential and tracks a record pointing at the generated
/// callback URL; unregister removes the tracked record; test and list report
/// from tracked state. No network anywhere.
#[derive(Debug, Default)]
pub struct StubActions;

static NEXT_REMOTE_ID: AtomicU64 = AtomicU64::new(1);

#[async_trait]
impl HostActions<StubHost> for StubActions {
    async fn register(
        &self,
        repo: &RepoRef,
        _client: &StubHost,
        user: &ActingUser,
        context: &ActionContext,
    ) -> HookResult<RegisterOutcome> {
        if context.hook(repo).await?.is_some() {
            return Ok(RegisterOutcome::AlreadyExists);
        }

        let auth = AuthData::generate(repo.clone());
        let token = auth.token;
        context
            .auth
            .update(&token, Box::new(move |_| Some(auth)))
            .await?;

        let callback_url = context.links.callback_url(token);
        let record = HookRecord::registered(
            NEXT_REMOTE_ID.fetch_add(1, Ordering::Relaxed),
            callback_url,
            user.username.clone(),
        );
        context
            .store
            .update(repo, Box::new(move |current| Some(current.unwrap_or(record))))
            .await?;

        Ok(RegisterOutcome::Created)
    }

    async fn list_all(
        &self,
        repo: &RepoRef,
        _client: &StubHost,
        _user: &ActingUser,
        context: &ActionContext,
    ) -> HookResult<Vec<RemoteHook>> {
        Ok(match context.hook(repo).await? {
            Some(record) => vec![RemoteHook {
                remote_id: record.remote_id.unwrap_or(0),
                callback_url: record.callback_url.unwrap_or_default(),
                events: vec!["push".to_string()],
                active: true,
            }],
            None => Vec::new(),
        })
    }

    async fn unregister(
        &self,
        repo: &RepoRef,
        _client: &StubHost,
        _user: &ActingUser,
        context: &ActionContext,
    ) -> HookResult<UnregisterOutcome> {
        if context.store.remove(repo).await? {
            Ok(UnregisterOutcome::Removed)
        } else {
            Ok(UnregisterOutcome::NeverExisted)
        }
    }

    async fn test(
        &self,
        repo: &RepoRef,
        _client: &StubHost,
        _user: &ActingUser,
        context: &ActionContext,
    ) -> HookResult<TestOutcome> {
        Ok(match context.hook(repo).await? {
            Some(_) => TestOutcome::Delivered,
            None => TestOutcome::NoHook,
        })
    }
}

/// A manager over in-memory stores with the stub actions.
pub fn manager() -> WebhookManager<StubHost> {
    WebhookManager::new(Arc::new(StubActions), context(), &HooksConfig::default())
}

/// A fresh context over in-memory stores.
pub fn context() -> Arc<ActionContext> {
    Arc::new(ActionContext::new(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryStore::new()),
        WebLinks::new("https://ci.example.com"),
    ))
}

pub fn repo(name: &str) -> RepoRef {
    RepoRef::new("github.com", "acme", name)
}

pub fn user(username: &str) -> ActingUser {
    ActingUser::new(Uuid::new_v4(), username)
}

pub fn revisions(pairs: &[(&str, &str)]) -> BranchRevisions {
    pairs
        .iter()
        .map(|(branch, rev)| (branch.to_string(), rev.to_string()))
        .collect()
}
