//! Pluggable host-side webhook operations.

use async_trait::async_trait;

use hookwatch_core::result::HookResult;
use hookwatch_core::types::RepoRef;
use hookwatch_entity::{ActingUser, RegisterOutcome, RemoteHook, TestOutcome, UnregisterOutcome};

use crate::context::ActionContext;

/// The four operations a hosting-service integration must provide.
///
/// Implementations own every protocol detail: how `client` talks to the
/// host, how permissions map onto [`hookwatch_core::error::HookError`], and
/// what a "hook" looks like on the wire. The rest of HookWatch only sees the
/// outcome types. `C` is the host client type, an authenticated API handle
/// for whatever service the implementation targets.
///
/// Implementations that create a hook are expected to mint credentials with
/// [`hookwatch_entity::AuthData::generate`] and persist them in
/// [`ActionContext::auth`]; the hook itself points at
/// [`crate::links::WebLinks::callback_url`]. Errors must use the closed
/// taxonomy: `Transport` for unreachable hosts, `Remote` for refused
/// operations, `AccessDenied` for permission failures. Retrying is the
/// caller's decision, never the action's.
#[async_trait]
pub trait HostActions<C>: Send + Sync
where
    C: Send + Sync,
{
    /// Ensure a webhook for `repo` exists on the host and is tracked.
    async fn register(
        &self,
        repo: &RepoRef,
        client: &C,
        user: &ActingUser,
        context: &ActionContext,
    ) -> HookResult<RegisterOutcome>;

    /// Enumerate the webhooks currently present on the host for `repo`.
    async fn list_all(
        &self,
        repo: &RepoRef,
        client: &C,
        user: &ActingUser,
        context: &ActionContext,
    ) -> HookResult<Vec<RemoteHook>>;

    /// Remove the webhook for `repo` from the host and from tracking.
    async fn unregister(
        &self,
        repo: &RepoRef,
        client: &C,
        user: &ActingUser,
        context: &ActionContext,
    ) -> HookResult<UnregisterOutcome>;

    /// Ask the host to emit a test delivery for `repo`'s webhook.
    async fn test(
        &self,
        repo: &RepoRef,
        client: &C,
        user: &ActingUser,
        context: &ActionContext,
    ) -> HookResult<TestOutcome>;
}
