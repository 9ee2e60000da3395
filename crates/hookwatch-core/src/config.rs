//! Application configuration schemas.
//!
//! Configuration is deserialized from TOML files via the `config` crate,
//! merged with an environment-specific overlay and `HOOKWATCH_`-prefixed
//! environment variables. Every field carries a serde default so an embedder
//! without any configuration file gets a working setup.

use serde::{Deserialize, Serialize};

use crate::error::HookError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Hook tracking settings.
    #[serde(default)]
    pub hooks: HooksConfig,
    /// Record store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Repository-state event bus settings.
    #[serde(default)]
    pub events: EventBusConfig,
}

/// Hook tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    /// How many days a confirmed delivery keeps a hook counted as live.
    /// Hooks used inside this window are excluded from staleness reports.
    #[serde(default = "default_liveness_window_days")]
    pub liveness_window_days: i64,
}

impl HooksConfig {
    /// The liveness window as a duration.
    pub fn liveness_window(&self) -> chrono::Duration {
        chrono::Duration::days(self.liveness_window_days)
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store backend: `"memory"` or `"file"`.
    #[serde(default = "default_store_backend")]
    pub backend: String,
    /// Directory for `file`-backend snapshots. Each store writes its own
    /// snapshot file under this directory.
    #[serde(default = "default_store_path")]
    pub path: String,
}

/// Repository-state event bus configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBusConfig {
    /// Broadcast channel capacity. A listener that falls further behind than
    /// this loses the oldest events and logs a warning.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            liveness_window_days: default_liveness_window_days(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            path: default_store_path(),
        }
    }
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `HOOKWATCH_`.
    pub fn load(env: &str) -> Result<Self, HookError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("HOOKWATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| HookError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| HookError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

fn default_liveness_window_days() -> i64 {
    7
}

fn default_store_backend() -> String {
    "memory".to_string()
}

fn default_store_path() -> String {
    "data".to_string()
}

fn default_buffer_size() -> usize {
    256
}
