//! In-memory record store implementation using the dashmap crate.

use std::fmt;
use std::hash::Hash;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use hookwatch_core::result::HookResult;
use hookwatch_core::traits::{Mutator, RecordStore};

/// In-memory record store backed by a sharded concurrent map.
///
/// [`MemoryStore::update`] holds the entry guard for the duration of the
/// mutator, so the read-modify-write on a single key is atomic: two
/// concurrent updates to the same key are applied one after the other, each
/// seeing the value the previous one produced.
pub struct MemoryStore<K, V> {
    records: DashMap<K, V>,
}

impl<K, V> MemoryStore<K, V>
where
    K: Eq + Hash,
{
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<K, V> Default for MemoryStore<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for MemoryStore<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("records", &self.records.len())
            .finish()
    }
}

#[async_trait]
impl<K, V> RecordStore<K, V> for MemoryStore<K, V>
where
    K: Clone + Eq + Hash + Ord + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> HookResult<Option<V>> {
        Ok(self.records.get(key).map(|entry| entry.value().clone()))
    }

    async fn update(&self, key: &K, mutate: Mutator<V>) -> HookResult<Option<V>> {
        // The entry guard pins the shard until the new value is written back,
        // which serializes concurrent mutators for the same key.
        let next = match self.records.entry(key.clone()) {
            Entry::Occupied(mut entry) => match mutate(Some(entry.get().clone())) {
                Some(next) => {
                    *entry.get_mut() = next.clone();
                    Some(next)
                }
                None => {
                    entry.remove();
                    None
                }
            },
            Entry::Vacant(entry) => match mutate(None) {
                Some(next) => {
                    entry.insert(next.clone());
                    Some(next)
                }
                None => None,
            },
        };
        Ok(next)
    }

    async fn remove(&self, key: &K) -> HookResult<bool> {
        Ok(self.records.remove(key).is_some())
    }

    async fn list_where(
        &self,
        predicate: &(dyn for<'a> Fn(&'a V) -> bool + Send + Sync),
    ) -> HookResult<Vec<(K, V)>> {
        let mut matches: Vec<(K, V)> = self
            .records
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        matches.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::*;

    fn make_store() -> MemoryStore<String, BTreeMap<String, String>> {
        MemoryStore::new()
    }

    #[tokio::test]
    async fn test_update_inserts_when_absent() {
        let store = make_store();
        let value = store
            .update(
                &"alpha".to_string(),
                Box::new(|current| {
                    assert!(current.is_none());
                    let mut map = BTreeMap::new();
                    map.insert("main".to_string(), "abc123".to_string());
                    Some(map)
                }),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(value.len(), 1);

        let stored = store.get(&"alpha".to_string()).await.unwrap();
        assert_eq!(stored, Some(value));
    }

    #[tokio::test]
    async fn test_update_sees_previous_value() {
        let key = "alpha".to_string();
        let store = make_store();
        store
            .update(
                &key,
                Box::new(|_| Some(BTreeMap::from([("main".to_string(), "abc".to_string())]))),
            )
            .await
            .unwrap();

        let value = store
            .update(
                &key,
                Box::new(|current| {
                    let mut map = current.unwrap_or_default();
                    map.insert("dev".to_string(), "def".to_string());
                    Some(map)
                }),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(value.len(), 2);
        assert_eq!(value.get("main").map(String::as_str), Some("abc"));
    }

    #[tokio::test]
    async fn test_update_on_absent_key_can_leave_it_absent() {
        let key = "alpha".to_string();
        let store = make_store();

        let outcome = store.update(&key, Box::new(|current| current)).await.unwrap();

        assert!(outcome.is_none());
        assert!(store.get(&key).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_update_returning_none_removes() {
        let key = "alpha".to_string();
        let store = make_store();
        store
            .update(&key, Box::new(|_| Some(BTreeMap::new())))
            .await
            .unwrap();

        let outcome = store.update(&key, Box::new(|_| None)).await.unwrap();
        assert!(outcome.is_none());
        assert!(store.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let key = "alpha".to_string();
        let store = make_store();
        store
            .update(&key, Box::new(|_| Some(BTreeMap::new())))
            .await
            .unwrap();

        assert!(store.remove(&key).await.unwrap());
        assert!(!store.remove(&key).await.unwrap());
        assert_eq!(store.get(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_where_filters_and_sorts() {
        let store = make_store();
        for (key, branch) in [("charlie", "main"), ("alpha", "main"), ("bravo", "dev")] {
            store
                .update(
                    &key.to_string(),
                    Box::new(move |_| {
                        Some(BTreeMap::from([(branch.to_string(), "rev".to_string())]))
                    }),
                )
                .await
                .unwrap();
        }

        let on_main = store
            .list_where(&|value| value.contains_key("main"))
            .await
            .unwrap();
        let keys: Vec<&str> = on_main.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "charlie"]);
    }

    #[tokio::test]
    async fn test_list_where_through_a_shared_store_handle() {
        let store: Arc<dyn RecordStore<String, BTreeMap<String, String>>> =
            Arc::new(make_store());
        for (key, branch) in [("alpha", "main"), ("bravo", "dev")] {
            store
                .update(
                    &key.to_string(),
                    Box::new(move |_| {
                        Some(BTreeMap::from([(branch.to_string(), "rev".to_string())]))
                    }),
                )
                .await
                .unwrap();
        }

        let on_main = store
            .list_where(&|value| value.contains_key("main"))
            .await
            .unwrap();
        assert_eq!(on_main.len(), 1);
        assert_eq!(on_main[0].0, "alpha");
    }

    #[tokio::test]
    async fn test_concurrent_updates_to_one_key_lose_nothing() {
        let store = Arc::new(make_store());
        let key = "repo".to_string();

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = Arc::clone(&store);
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                store
                    .update(
                        &key,
                        Box::new(move |current| {
                            let mut map = current.unwrap_or_default();
                            map.insert(format!("branch-{i}"), format!("rev-{i}"));
                            Some(map)
                        }),
                    )
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let merged = store.get(&key).await.unwrap().unwrap();
        assert_eq!(merged.len(), 32);
    }
}
