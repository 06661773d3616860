//! The dispatcher: listener registry plus synchronous and deferred delivery.
//!
//! A [`Dispatcher`] is generic over its [`EventRegistry`], and the registry
//! type carries the concurrency-safety choice:
//!
//! - [`SyncDispatcher`] (`Dispatcher<ConcurrentRegistry>`) is `Send + Sync`
//!   and can be shared across threads. Its [`defer_post`](Dispatcher::defer_post)
//!   delivers synchronously, exactly like [`post`](Dispatcher::post).
//! - [`LocalDispatcher`] (`Dispatcher<LocalRegistry>`) is `Send` but not
//!   `Sync` and does no locking. Its `defer_post` hands delivery to a lazily
//!   started worker pool and returns immediately.
//!
//! Within one post, listeners run in the order of the configured
//! [`CollectionKind`]. A listener returning `Err` stops delivery for that post
//! and the error is returned to the caller as is.

use crate::listener::ListenerEntry;
use crate::registry::{
    CollectionKind, ConcurrentRegistry, EventRegistry, LocalRegistry, RegistryStatistics,
    RegistryStats,
};
use crate::{Error, Event, EventTypeKey, Result};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{error, trace};

pub mod builder;
pub mod config;
pub mod worker;

pub use builder::DispatcherBuilder;
pub use config::DispatcherConfig;
pub use worker::{WorkerConfig, WorkerPool};

/// A dispatcher that tolerates concurrent use from many threads
pub type SyncDispatcher = Dispatcher<ConcurrentRegistry>;

/// A single-threaded dispatcher with no internal locking
pub type LocalDispatcher = Dispatcher<LocalRegistry>;

/// Counters shared with deferred jobs
#[derive(Debug, Default)]
struct DispatchCounters {
    events_posted: AtomicU64,
    events_deferred: AtomicU64,
    deliveries: AtomicU64,
    handler_failures: AtomicU64,
}

/// Routes posted events to the listeners registered for their exact type.
///
/// # Example
///
/// ```rust
/// use event_dispatch::{Dispatcher, Event, ListenerEntry};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// #[derive(Debug)]
/// struct Ping;
/// impl Event for Ping {}
///
/// let dispatcher = Dispatcher::synchronised();
/// let hits = Arc::new(AtomicUsize::new(0));
///
/// let counter = hits.clone();
/// let listener = ListenerEntry::from_fn(move |_: &Ping| {
///     counter.fetch_add(1, Ordering::SeqCst);
///     Ok(())
/// });
///
/// dispatcher.register(&listener);
/// dispatcher.post(&Ping).unwrap();
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
///
/// dispatcher.unregister(&listener);
/// dispatcher.post(&Ping).unwrap();
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
#[derive(Debug)]
pub struct Dispatcher<R: EventRegistry = ConcurrentRegistry> {
    registry: R,
    config: DispatcherConfig,
    workers: OnceLock<WorkerPool>,
    counters: Arc<DispatchCounters>,
}

impl Dispatcher<ConcurrentRegistry> {
    /// A concurrency-safe dispatcher with the default settings
    pub fn synchronised() -> Self {
        Self::from_config(DispatcherConfig::default())
    }

    /// Create a new dispatcher builder
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }
}

impl Default for Dispatcher<ConcurrentRegistry> {
    fn default() -> Self {
        Self::synchronised()
    }
}

impl Dispatcher<LocalRegistry> {
    /// A single-threaded dispatcher with the default settings
    pub fn unsynchronised() -> Self {
        Self::from_config(DispatcherConfig::default())
    }
}

impl<R: EventRegistry> Dispatcher<R> {
    /// Create a dispatcher from a configuration
    pub fn with_config(config: DispatcherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    pub(crate) fn from_config(config: DispatcherConfig) -> Self {
        Self {
            registry: R::with_kind(config.collection),
            config,
            workers: OnceLock::new(),
            counters: Arc::new(DispatchCounters::default()),
        }
    }

    /// Register a single listener.
    ///
    /// Under [`CollectionKind::Ordered`] registering the same listener twice
    /// delivers every event to it twice; the other kinds ignore the repeat.
    pub fn register(&self, listener: &ListenerEntry) {
        self.registry.register(listener.clone());
    }

    /// Register several listeners in iteration order.
    pub fn register_all<'a, I>(&self, listeners: I)
    where
        I: IntoIterator<Item = &'a ListenerEntry>,
    {
        for listener in listeners {
            self.register(listener);
        }
    }

    /// Unregister a single listener.
    ///
    /// Removes every registration of it. Returns false, and does nothing
    /// else, if it was not registered.
    pub fn unregister(&self, listener: &ListenerEntry) -> bool {
        self.registry.unregister(listener)
    }

    /// Unregister each of the given listeners.
    pub fn unregister_all<'a, I>(&self, listeners: I)
    where
        I: IntoIterator<Item = &'a ListenerEntry>,
    {
        for listener in listeners {
            self.unregister(listener);
        }
    }

    /// Unregister every listener of every event type.
    ///
    /// The dispatcher stays usable; later registrations work as before.
    #[doc(alias = "unregister_everything")]
    pub fn clear(&self) {
        self.registry.clear();
    }

    /// Post an event to every listener registered for its exact type.
    ///
    /// Listeners run on the calling thread, in collection order. Posting an
    /// event nobody listens to does nothing. If a listener fails, the
    /// listeners after it are skipped and its error is returned unchanged.
    pub fn post<E: Event>(&self, event: &E) -> Result<()> {
        self.counters.events_posted.fetch_add(1, Ordering::Relaxed);

        let event_type = E::type_key();
        let listeners = self.registry.listeners(event_type);

        if listeners.is_empty() {
            trace!(%event_type, "No listeners for event");
            return Ok(());
        }

        trace!(
            %event_type,
            listener_count = listeners.len(),
            "Posting event"
        );

        deliver(&listeners, event, &self.counters)
    }

    /// Post an event without blocking on delivery.
    ///
    /// On a concurrency-safe dispatcher this is exactly [`post`](Self::post).
    /// Otherwise the listeners are looked up now and invoked on a worker
    /// thread; the call returns before they run. Failures of deferred
    /// listeners are logged at error level and counted in
    /// [`DispatcherStats::handler_failures`].
    ///
    /// Fails only if the worker pool cannot be started, or with a listener
    /// error when delivery is synchronous.
    pub fn defer_post<E: Event>(&self, event: E) -> Result<()> {
        self.counters.events_deferred.fetch_add(1, Ordering::Relaxed);

        if R::CONCURRENT {
            return self.post(&event);
        }

        let event_type = E::type_key();
        let listeners = self.registry.listeners(event_type);

        if listeners.is_empty() {
            trace!(%event_type, "No listeners for deferred event");
            return Ok(());
        }

        trace!(
            %event_type,
            listener_count = listeners.len(),
            "Deferring event"
        );

        let counters = Arc::clone(&self.counters);
        self.workers()?.execute(move || {
            if let Err(error) = deliver(&listeners, &event, &counters) {
                error!(%event_type, %error, "Deferred listener failed");
            }
        })
    }

    /// Number of listeners registered for `E`
    pub fn listener_count<E: Event>(&self) -> usize {
        self.registry.listener_count(E::type_key())
    }

    /// Whether any listener is registered for `E`
    pub fn has_listeners<E: Event>(&self) -> bool {
        self.registry.has_listeners(E::type_key())
    }

    /// Total number of listener registrations
    pub fn total_listeners(&self) -> usize {
        self.registry.total_listeners()
    }

    /// Every event type that currently has a listener collection
    pub fn event_types(&self) -> Vec<EventTypeKey> {
        self.registry.event_types()
    }

    /// Whether this dispatcher tolerates concurrent use
    pub fn is_concurrent(&self) -> bool {
        R::CONCURRENT
    }

    /// The listener collection kind
    pub fn collection_kind(&self) -> CollectionKind {
        self.registry.collection_kind()
    }

    /// The configuration this dispatcher was built with
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// The underlying registry
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Get statistics about the dispatcher
    pub fn stats(&self) -> DispatcherStats {
        DispatcherStats {
            events_posted: self.counters.events_posted.load(Ordering::Relaxed),
            events_deferred: self.counters.events_deferred.load(Ordering::Relaxed),
            deliveries: self.counters.deliveries.load(Ordering::Relaxed),
            handler_failures: self.counters.handler_failures.load(Ordering::Relaxed),
            deferred_jobs: self.workers.get().map_or(0, WorkerPool::jobs_scheduled),
            registry: self.registry.stats(),
        }
    }

    fn workers(&self) -> Result<&WorkerPool> {
        if let Some(pool) = self.workers.get() {
            return Ok(pool);
        }

        let pool = WorkerPool::start(&self.config.workers)?;
        // Losing a start race keeps the winner's pool and drops ours
        let _ = self.workers.set(pool);

        self.workers
            .get()
            .ok_or_else(|| Error::internal("Worker pool missing after start"))
    }
}

/// Invoke each listener in turn, stopping at the first failure.
fn deliver<E: Event>(
    listeners: &[ListenerEntry],
    event: &E,
    counters: &DispatchCounters,
) -> Result<()> {
    for listener in listeners {
        counters.deliveries.fetch_add(1, Ordering::Relaxed);

        if let Err(e) = listener.invoke(event) {
            counters.handler_failures.fetch_add(1, Ordering::Relaxed);
            trace!(
                listener_id = %listener.id(),
                listener = listener.name(),
                "Listener failed, skipping the rest"
            );
            return Err(e);
        }
    }
    Ok(())
}

/// Statistics about a dispatcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatcherStats {
    /// Calls to `post`, including synchronous `defer_post` deliveries
    pub events_posted: u64,

    /// Calls to `defer_post`
    pub events_deferred: u64,

    /// Listener invocations started
    pub deliveries: u64,

    /// Listener invocations that returned an error
    pub handler_failures: u64,

    /// Deliveries handed to the worker pool
    pub deferred_jobs: u64,

    /// Registry statistics
    pub registry: RegistryStats,
}

impl fmt::Display for DispatcherStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dispatcher Stats: {} listeners, {} event types, {} posted, {} deferred, {} deliveries, {} failures",
            self.registry.total_listeners,
            self.registry.event_types,
            self.events_posted,
            self.events_deferred,
            self.deliveries,
            self.handler_failures
        )
    }
}
