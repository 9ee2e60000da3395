//! Backend selection for record stores.

use std::hash::Hash;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use hookwatch_core::config::StoreConfig;
use hookwatch_core::error::HookError;
use hookwatch_core::result::HookResult;
use hookwatch_core::traits::RecordStore;

/// Open a record store for the backend named in configuration.
///
/// The same configuration block drives every store the application opens, so
/// hook records and auth records land in the same backend. The file backend
/// derives a distinct snapshot per store from `name` (for example
/// `hooks` becomes `<path>/hooks.json`); the memory backend ignores it.
pub async fn open_store<K, V>(
    config: &StoreConfig,
    name: &str,
) -> HookResult<Arc<dyn RecordStore<K, V>>>
where
    K: Clone + Eq + Hash + Ord + Serialize + DeserializeOwned + Send + Sync + 'static,
    V: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let store: Arc<dyn RecordStore<K, V>> = match config.backend.as_str() {
        #[cfg(feature = "memory")]
        "memory" => {
            info!(store = name, "Initializing in-memory record store");
            Arc::new(crate::memory::MemoryStore::new())
        }
        #[cfg(feature = "file")]
        "file" => {
            let path = std::path::Path::new(&config.path).join(format!("{name}.json"));
            info!(store = name, path = %path.display(), "Initializing file-backed record store");
            Arc::new(crate::file::FileStore::open(path).await?)
        }
        other => {
            return Err(HookError::configuration(format!(
                "Unknown store backend: '{other}'. Supported: memory, file"
            )));
        }
    };

    Ok(store)
}
