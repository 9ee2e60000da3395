//! Host-side hook descriptor.

use serde::{Deserialize, Serialize};

/// A webhook as reported by the hosting API's list operation.
///
/// Produced by list actions; the core displays it but never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteHook {
    /// The hook's identifier on the hosting side.
    pub remote_id: u64,
    /// The delivery URL the hook posts to.
    pub callback_url: String,
    /// Event names the hook subscribes to (e.g. `"push"`).
    pub events: Vec<String>,
    /// Whether the hosting side reports the hook as active.
    pub active: bool,
}

impl RemoteHook {
    /// Check whether this hook delivers to the given callback URL.
    pub fn delivers_to(&self, callback_url: &str) -> bool {
        self.callback_url == callback_url
    }
}
