//! Shared context handed to every action implementation.

use std::sync::Arc;

use uuid::Uuid;

use hookwatch_core::result::HookResult;
use hookwatch_core::traits::RecordStore;
use hookwatch_core::types::RepoRef;
use hookwatch_entity::{AuthData, HookRecord};

use crate::links::WebLinks;

/// Store of tracked hook records, keyed by repository.
pub type SharedHookStore = Arc<dyn RecordStore<RepoRef, HookRecord>>;

/// Store of callback credentials, keyed by the public token embedded in the
/// delivery URL.
pub type SharedAuthStore = Arc<dyn RecordStore<Uuid, AuthData>>;

/// Context for action implementations.
///
/// Passed into every [`crate::actions::HostActions`] call so that an action
/// can read and update tracked state without owning the stores, and can
/// produce the credentials and delivery URLs a new hook needs.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// Tracked hook records.
    pub store: SharedHookStore,
    /// Callback credentials for delivery authentication.
    pub auth: SharedAuthStore,
    /// Delivery URL generator.
    pub links: WebLinks,
}

impl ActionContext {
    /// Creates a new action context.
    pub fn new(store: SharedHookStore, auth: SharedAuthStore, links: WebLinks) -> Self {
        Self { store, auth, links }
    }

    /// Convenience lookup of the tracked record for `repo`.
    pub async fn hook(&self, repo: &RepoRef) -> HookResult<Option<HookRecord>> {
        self.store.get(repo).await
    }
}
