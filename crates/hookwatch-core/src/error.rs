//! Unified error taxonomy for HookWatch.
//!
//! Action implementations surface [`HookError::Transport`],
//! [`HookError::Remote`], and [`HookError::AccessDenied`] to describe failed
//! calls against the hosting API; those three variants propagate through the
//! dispatcher untouched so callers can branch on them. An out-of-date hook is
//! **not** an error anywhere in this workspace; it is the durable
//! `correct = false` flag on the record, observable through the query surface.

use thiserror::Error;

/// The unified error type used throughout HookWatch.
#[derive(Debug, Error)]
pub enum HookError {
    /// Network or I/O failure reaching the remote host. Never retried here;
    /// retry policy belongs to the action implementation or its caller.
    #[error("transport failure: {message}")]
    Transport {
        /// A human-readable description of the failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote API responded but refused the operation.
    #[error("remote host rejected the operation (status {status}): {message}")]
    Remote {
        /// HTTP-ish status code reported by the remote.
        status: u16,
        /// The remote's reason, as far as it gave one.
        message: String,
    },

    /// The acting user or credential lacks permission for the operation.
    /// Distinct from [`HookError::Remote`] so callers can prompt for
    /// re-authorization.
    #[error("access denied for '{username}': {message}")]
    AccessDenied {
        /// The user whose credential was refused.
        username: String,
        /// What was refused.
        message: String,
    },

    /// The record store failed to read or persist a record.
    #[error("store failure: {message}")]
    Store {
        /// A human-readable description of the failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration could not be loaded or validated.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl HookError {
    /// Create a transport error without an underlying cause.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a remote-rejection error carrying the remote's status.
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Create an access-denied error for the given user.
    pub fn access_denied(username: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AccessDenied {
            username: username.into(),
            message: message.into(),
        }
    }

    /// Create a store error without an underlying cause.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store error with an underlying cause.
    pub fn store_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Stable label for this error's kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Remote { .. } => "remote_rejection",
            Self::AccessDenied { .. } => "access_denied",
            Self::Store { .. } => "store",
            Self::Configuration(_) => "configuration",
        }
    }
}

impl From<std::io::Error> for HookError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport {
            message: format!("I/O error: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for HookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Store {
            message: format!("JSON serialization error: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

impl From<config::ConfigError> for HookError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(format!("{err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels_are_stable() {
        assert_eq!(HookError::transport("down").kind(), "transport");
        assert_eq!(HookError::remote(404, "missing").kind(), "remote_rejection");
        assert_eq!(
            HookError::access_denied("bob", "no scope").kind(),
            "access_denied"
        );
        assert_eq!(HookError::store("broken").kind(), "store");
        assert_eq!(HookError::configuration("bad").kind(), "configuration");
    }

    #[test]
    fn test_remote_display_includes_status() {
        let err = HookError::remote(422, "hook already exists");
        let rendered = err.to_string();
        assert!(rendered.contains("422"));
        assert!(rendered.contains("hook already exists"));
    }

    #[test]
    fn test_io_errors_become_transport() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = HookError::from(io);
        assert_eq!(err.kind(), "transport");
    }
}
