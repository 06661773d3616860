//! Configuration for the dispatcher.

use super::worker::WorkerConfig;
use crate::registry::CollectionKind;
use crate::Result;
use std::time::Duration;

/// Configuration for a [`Dispatcher`](crate::Dispatcher)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Duplicate and ordering policy of the per-type listener collections
    pub collection: CollectionKind,

    /// Worker pool used by deferred posts on unsynchronised dispatchers
    pub workers: WorkerConfig,
}

impl DispatcherConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the listener collection kind
    pub fn collection(mut self, kind: CollectionKind) -> Self {
        self.collection = kind;
        self
    }

    /// Set the maximum number of deferred workers
    pub fn max_workers(mut self, workers: usize) -> Self {
        self.workers.max_workers = workers;
        self
    }

    /// Set how long idle deferred workers are kept
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.workers.idle_timeout = timeout;
        self
    }

    /// Configure the worker pool
    pub fn worker_config<F>(mut self, f: F) -> Self
    where
        F: FnOnce(WorkerConfig) -> WorkerConfig,
    {
        self.workers = f(self.workers);
        self
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<()> {
        self.workers.validate()
    }
}

/// Preset configurations for common use cases
impl DispatcherConfig {
    /// Insertion-ordered delivery, duplicate registrations deliver twice
    pub fn ordered() -> Self {
        Self::default().collection(CollectionKind::Ordered)
    }

    /// Insertion-ordered delivery, duplicate registrations are ignored
    pub fn deduplicated() -> Self {
        Self::default().collection(CollectionKind::Deduplicated)
    }

    /// Hash-set collections: deduplicating, no delivery order
    pub fn unordered() -> Self {
        Self::default().collection(CollectionKind::Unordered)
    }

    /// Configuration for testing
    pub fn test() -> Self {
        Self::default().worker_config(|w| {
            w.max_workers(4)
                .idle_timeout(Duration::from_secs(1))
                .name_prefix("test-dispatch-worker")
        })
    }
}
