//! Repository identity.
//!
//! A [`RepoRef`] names one repository on one hosting server and is the key
//! under which all hook state is stored. It is a plain value type: ordering
//! and hashing are derived so it can key maps and produce sorted listings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity of a repository on a Git hosting server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoRef {
    /// Hosting server, e.g. `github.com` or `git.example.com:8443`.
    pub server: String,
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub name: String,
}

/// Error returned when a string does not name a repository.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid repository reference '{0}': expected server/owner/name")]
pub struct ParseRepoRefError(pub String);

impl RepoRef {
    /// Create a repository reference from its three components.
    pub fn new(
        server: impl Into<String>,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Resolve a Git clone URL to a repository reference.
    ///
    /// Accepts `https://` / `http://` URLs, `ssh://` URLs, and scp-like
    /// `git@host:owner/name` remotes, with or without a `.git` suffix.
    /// Returns `None` for anything else; callers use this to filter out
    /// repository roots that cannot carry a hook.
    pub fn from_url(url: &str) -> Option<Self> {
        let url = url.trim().trim_end_matches('/');
        let path = if let Some(rest) = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .or_else(|| url.strip_prefix("ssh://"))
        {
            // Drop any userinfo in the authority part.
            let (authority, path) = rest.split_once('/')?;
            let host = match authority.rsplit_once('@') {
                Some((_, host)) => host,
                None => authority,
            };
            format!("{host}/{path}")
        } else if let Some((user_host, path)) = url.split_once(':') {
            // scp-like remote; the '@' requirement keeps plain paths out.
            let host = user_host.split_once('@')?.1;
            format!("{host}/{path}")
        } else {
            return None;
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let &[server, owner, name] = segments.as_slice() else {
            return None;
        };
        let name = name.strip_suffix(".git").unwrap_or(name);
        if name.is_empty() {
            return None;
        }
        Some(Self::new(server, owner, name))
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.server, self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = ParseRepoRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('/').collect();
        match segments.as_slice() {
            [server, owner, name]
                if !server.is_empty() && !owner.is_empty() && !name.is_empty() =>
            {
                Ok(Self::new(*server, *owner, *name))
            }
            _ => Err(ParseRepoRefError(s.to_string())),
        }
    }
}
