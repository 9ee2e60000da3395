//! Web link generation for hook callbacks.

use uuid::Uuid;

/// Builds the URLs handed to the hosting service when a hook is registered.
#[derive(Debug, Clone)]
pub struct WebLinks {
    root_url: String,
}

impl WebLinks {
    /// Create a link generator rooted at the application's public URL.
    /// A trailing slash on `root_url` is tolerated and stripped.
    pub fn new(root_url: impl Into<String>) -> Self {
        let mut root_url = root_url.into();
        while root_url.ends_with('/') {
            root_url.pop();
        }
        Self { root_url }
    }

    /// The application's public root URL, without a trailing slash.
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// The delivery URL for a hook authorized by `token`.
    pub fn callback_url(&self, token: Uuid) -> String {
        format!("{}/webhooks/git?token={token}", self.root_url)
    }
}
