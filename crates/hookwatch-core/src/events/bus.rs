//! In-process broadcast bus for repository-state events.

use tokio::sync::broadcast;

use crate::config::EventBusConfig;

use super::RepoStateEvent;

/// Broadcast bus carrying [`RepoStateEvent`]s to any number of subscribers.
///
/// Events published while no subscriber exists are dropped. A subscriber that
/// falls further behind than the bus capacity loses the oldest events; the
/// receiver reports the lag so consumers can log it.
#[derive(Debug)]
pub struct RepoStateBus {
    /// Underlying broadcast sender.
    tx: broadcast::Sender<RepoStateEvent>,
}

impl RepoStateBus {
    /// Create a bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Create a bus from configuration.
    pub fn from_config(config: &EventBusConfig) -> Self {
        Self::new(config.buffer_size)
    }

    /// Publish an event. Returns the number of subscribers it reached.
    pub fn publish(&self, event: RepoStateEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to all events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<RepoStateEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for RepoStateBus {
    fn default() -> Self {
        Self::from_config(&EventBusConfig::default())
    }
}
