//! File-backed record store implementation.
//!
//! Records live in an in-memory map guarded by a single mutex; every change
//! rewrites a JSON snapshot of the whole map on disk. The snapshot is a
//! sorted `Vec<(K, V)>` rather than a JSON object so keys are not limited to
//! strings, and it is written to a sibling temp file first and renamed into
//! place so a crash mid-write never truncates the live snapshot. A failed
//! write rolls the in-memory change back, so memory never runs ahead of the
//! file.
//!
//! This backend trades write amplification for simplicity. Record counts here
//! are webhook counts (hundreds, not millions), so the whole-map rewrite is
//! well within budget.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use hookwatch_core::error::HookError;
use hookwatch_core::result::HookResult;
use hookwatch_core::traits::{Mutator, RecordStore};

/// Record store persisted as a JSON snapshot on disk.
pub struct FileStore<K, V> {
    path: PathBuf,
    records: Mutex<HashMap<K, V>>,
}

impl<K, V> FileStore<K, V>
where
    K: Clone + Eq + Hash + Ord + Serialize + DeserializeOwned + Send + Sync + 'static,
    V: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Open the store at `path`, loading the existing snapshot if present.
    ///
    /// A missing file is not an error; the store starts empty and the file
    /// appears on the first write.
    pub async fn open(path: impl Into<PathBuf>) -> HookResult<Self> {
        let path = path.into();
        let records: HashMap<K, V> = match fs::read(&path).await {
            Ok(bytes) => {
                let entries: Vec<(K, V)> = serde_json::from_slice(&bytes)?;
                entries.into_iter().collect()
            }
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                return Err(HookError::store_with_source(
                    format!("Failed to read store snapshot {}", path.display()),
                    err,
                ));
            }
        };
        debug!(
            path = %path.display(),
            records = records.len(),
            "Loaded record store snapshot"
        );

        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    async fn persist(&self, records: &HashMap<K, V>) -> HookResult<()> {
        let mut entries: Vec<(&K, &V)> = records.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        let json = serde_json::to_vec_pretty(&entries)?;

        let parent = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            fs::create_dir_all(parent).await.map_err(|err| {
                HookError::store_with_source(
                    format!("Failed to create store directory {}", parent.display()),
                    err,
                )
            })?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &json).await.map_err(|err| {
            HookError::store_with_source(
                format!("Failed to write store snapshot {}", tmp.display()),
                err,
            )
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|err| {
            HookError::store_with_source(
                format!("Failed to replace store snapshot {}", self.path.display()),
                err,
            )
        })?;

        Ok(())
    }

    /// Put the prior entry back after a failed snapshot write, so the state a
    /// caller sees alongside the error is the state the snapshot still holds.
    fn restore(records: &mut HashMap<K, V>, key: &K, previous: Option<V>) {
        match previous {
            Some(prev) => {
                records.insert(key.clone(), prev);
            }
            None => {
                records.remove(key);
            }
        }
    }
}

impl<K, V> fmt::Debug for FileStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<K, V> RecordStore<K, V> for FileStore<K, V>
where
    K: Clone + Eq + Hash + Ord + Serialize + DeserializeOwned + Send + Sync + 'static,
    V: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> HookResult<Option<V>> {
        let records = self.records.lock().await;
        Ok(records.get(key).cloned())
    }

    async fn update(&self, key: &K, mutate: Mutator<V>) -> HookResult<Option<V>> {
        let mut records = self.records.lock().await;
        let previous = records.get(key).cloned();
        match mutate(previous.clone()) {
            Some(next) => {
                records.insert(key.clone(), next.clone());
                if let Err(err) = self.persist(&records).await {
                    Self::restore(&mut records, key, previous);
                    return Err(err);
                }
                Ok(Some(next))
            }
            None => {
                if previous.is_some() {
                    records.remove(key);
                    if let Err(err) = self.persist(&records).await {
                        Self::restore(&mut records, key, previous);
                        return Err(err);
                    }
                }
                Ok(None)
            }
        }
    }

    async fn remove(&self, key: &K) -> HookResult<bool> {
        let mut records = self.records.lock().await;
        let Some(previous) = records.remove(key) else {
            return Ok(false);
        };
        if let Err(err) = self.persist(&records).await {
            records.insert(key.clone(), previous);
            return Err(err);
        }
        Ok(true)
    }

    async fn list_where(
        &self,
        predicate: &(dyn for<'a> Fn(&'a V) -> bool + Send + Sync),
    ) -> HookResult<Vec<(K, V)>> {
        let records = self.records.lock().await;
        let mut matches: Vec<(K, V)> = records
            .iter()
            .filter(|(_, value)| predicate(value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        matches.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(matches)
    }
}
