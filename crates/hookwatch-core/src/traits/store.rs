//! Keyed record store with per-key atomic read-modify-write.

use std::fmt;

use async_trait::async_trait;

use crate::result::HookResult;

/// Mutation applied to a record inside [`RecordStore::update`].
///
/// The closure receives the currently stored value (`None` when the key is
/// absent) and returns the value the key should hold afterwards (`None` to
/// leave it absent or delete it). It must be a pure old-to-new function: no
/// shared mutation, no calls back into the store.
///
/// The `Option`-to-`Option` shape covers every caller with one contract:
/// an upsert ignores the input and returns `Some`, a present-only update
/// maps over it (`current.map(..)`, so a record deleted by a concurrent
/// writer stays deleted), and returning `None` for a present value removes
/// it atomically.
pub type Mutator<V> = Box<dyn FnOnce(Option<V>) -> Option<V> + Send>;

/// A keyed store of records supporting atomic per-key updates.
///
/// This is the single serialization point for concurrent writers: every
/// change to a record goes through [`RecordStore::update`], whose mutator
/// always sees the value currently stored (never a stale snapshot), so two
/// interleaved updates cannot lose each other's field-level effects. How a
/// backend achieves that (a per-key lock, compare-and-swap, a transaction) is
/// its own business.
///
/// Reads ([`RecordStore::get`], [`RecordStore::list_where`]) do not
/// participate in that serialization and may observe a slightly stale
/// snapshot relative to in-flight updates.
#[async_trait]
pub trait RecordStore<K, V>: Send + Sync + fmt::Debug + 'static
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Fetch the record stored under `key`, if any.
    async fn get(&self, key: &K) -> HookResult<Option<V>>;

    /// Atomically replace the record under `key` with whatever the mutator
    /// returns for the current value. Returns the state the key was left in.
    async fn update(&self, key: &K, mutate: Mutator<V>) -> HookResult<Option<V>>;

    /// Remove the record under `key`. Returns `true` if one existed.
    async fn remove(&self, key: &K) -> HookResult<bool>;

    /// Snapshot all records whose value satisfies the predicate.
    ///
    /// The predicate needs the explicit `for<'a>` binder: it is called on
    /// borrows local to the backend's iteration, not on borrows of the
    /// caller's choosing.
    async fn list_where(
        &self,
        predicate: &(dyn for<'a> Fn(&'a V) -> bool + Send + Sync),
    ) -> HookResult<Vec<(K, V)>>;
}
