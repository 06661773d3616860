//! Builder pattern for constructing Dispatcher instances.

use super::{DispatcherConfig, LocalDispatcher, SyncDispatcher};
use crate::registry::{CollectionKind, EventRegistry};
use crate::{Dispatcher, Result};
use std::time::Duration;
use tracing::debug;

/// Builder for creating [`Dispatcher`] instances
///
/// ```rust
/// use event_dispatch::{CollectionKind, Dispatcher};
/// use std::time::Duration;
///
/// let local = Dispatcher::builder()
///     .collection(CollectionKind::Deduplicated)
///     .max_workers(8)
///     .idle_timeout(Duration::from_secs(10))
///     .unsynchronised()
///     .unwrap();
///
/// assert!(!local.is_concurrent());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DispatcherBuilder {
    config: DispatcherConfig,
}

impl DispatcherBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom configuration
    pub fn config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure the dispatcher
    pub fn configure<F>(mut self, f: F) -> Self
    where
        F: FnOnce(DispatcherConfig) -> DispatcherConfig,
    {
        self.config = f(self.config);
        self
    }

    /// Set the listener collection kind
    pub fn collection(mut self, kind: CollectionKind) -> Self {
        self.config.collection = kind;
        self
    }

    /// Build with deduplicating, insertion-ordered collections
    pub fn deduplicated(self) -> Self {
        self.collection(CollectionKind::Deduplicated)
    }

    /// Build with hash-set collections
    pub fn unordered(self) -> Self {
        self.collection(CollectionKind::Unordered)
    }

    /// Set the maximum number of deferred workers
    pub fn max_workers(mut self, workers: usize) -> Self {
        self.config.workers.max_workers = workers;
        self
    }

    /// Set how long idle deferred workers are kept
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.workers.idle_timeout = timeout;
        self
    }

    /// Set the worker thread name prefix
    pub fn worker_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.workers.name_prefix = prefix.into();
        self
    }

    /// Build a dispatcher over any registry type
    pub fn build<R: EventRegistry>(self) -> Result<Dispatcher<R>> {
        self.config.validate()?;

        debug!(
            concurrent = R::CONCURRENT,
            collection = ?self.config.collection,
            "Building dispatcher"
        );

        Ok(Dispatcher::from_config(self.config))
    }

    /// Build a concurrency-safe dispatcher
    pub fn synchronised(self) -> Result<SyncDispatcher> {
        self.build()
    }

    /// Build a single-threaded dispatcher
    pub fn unsynchronised(self) -> Result<LocalDispatcher> {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::LocalRegistry;
    use crate::Error;

    #[test]
    fn test_builder_defaults() {
        let dispatcher = DispatcherBuilder::new().synchronised().unwrap();
        assert!(dispatcher.is_concurrent());
        assert_eq!(dispatcher.collection_kind(), CollectionKind::Ordered);
        assert_eq!(dispatcher.config(), &DispatcherConfig::default());
    }

    #[test]
    fn test_builder_settings() {
        let dispatcher = Dispatcher::builder()
            .unordered()
            .max_workers(3)
            .idle_timeout(Duration::from_millis(500))
            .worker_name_prefix("custom")
            .build::<LocalRegistry>()
            .unwrap();

        let config = dispatcher.config();
        assert_eq!(config.collection, CollectionKind::Unordered);
        assert_eq!(config.workers.max_workers, 3);
        assert_eq!(config.workers.idle_timeout, Duration::from_millis(500));
        assert_eq!(config.workers.name_prefix, "custom");
    }

    #[test]
    fn test_builder_configure() {
        let dispatcher = Dispatcher::builder()
            .config(DispatcherConfig::test())
            .configure(|c| c.collection(CollectionKind::Deduplicated))
            .unsynchronised()
            .unwrap();

        assert_eq!(dispatcher.collection_kind(), CollectionKind::Deduplicated);
        assert_eq!(dispatcher.config().workers.max_workers, 4);
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = Dispatcher::builder().max_workers(0).unsynchronised();
        assert!(matches!(result, Err(Error::Config(_))));

        let result = Dispatcher::builder().worker_name_prefix("").synchronised();
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
