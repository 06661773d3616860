//! Event registry for mapping event types to listeners.
//!
//! The registry owns one [`CollectionKind`]-shaped collection per event type.
//! Collections are created lazily on the first registration for a type; a
//! type that is present always has a collection, possibly an empty one.
//!
//! Two implementations exist:
//! - [`ConcurrentRegistry`] is backed by a `DashMap` and can be shared across
//!   threads.
//! - [`LocalRegistry`] is backed by a plain hash map in a `RefCell`. It does no
//!   locking and is `!Sync`, so it can only ever be used from one thread at a
//!   time.

use crate::listener::ListenerEntry;
use crate::EventTypeKey;
use std::fmt::Debug;

mod dashmap;
mod local;
mod set;

pub use self::dashmap::ConcurrentRegistry;
pub use local::LocalRegistry;
pub use set::CollectionKind;
pub(crate) use set::ListenerSet;

/// Trait for registries that map event types to listeners.
///
/// All methods take `&self`; implementations decide how interior mutation is
/// made safe. Lookups return snapshots so that listeners may register or
/// unregister while an event is being delivered.
pub trait EventRegistry: Debug {
    /// Whether this registry tolerates concurrent use from several threads
    const CONCURRENT: bool;

    /// Create an empty registry whose per-type collections are of `kind`
    fn with_kind(kind: CollectionKind) -> Self
    where
        Self: Sized;

    /// The collection kind used for every event type
    fn collection_kind(&self) -> CollectionKind;

    /// Add a listener under its declared event type.
    ///
    /// Returns false when a deduplicating collection already held it.
    fn register(&self, entry: ListenerEntry) -> bool;

    /// Remove a listener; returns false if it was not registered
    fn unregister(&self, entry: &ListenerEntry) -> bool;

    /// Snapshot of the listeners for an event type, in iteration order
    fn listeners(&self, event_type: EventTypeKey) -> Vec<ListenerEntry>;

    /// Number of listeners registered for an event type
    fn listener_count(&self, event_type: EventTypeKey) -> usize;

    /// Whether an event type has at least one listener
    fn has_listeners(&self, event_type: EventTypeKey) -> bool;

    /// Total number of listeners across all event types
    fn total_listeners(&self) -> usize;

    /// Every event type that has a collection
    fn event_types(&self) -> Vec<EventTypeKey>;

    /// Drop every collection
    fn clear(&self);
}

/// Registry statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Number of event types with a collection
    pub event_types: usize,

    /// Total number of registered listeners
    pub total_listeners: usize,

    /// Event types whose collection has been emptied by unregistration
    pub empty_collections: usize,
}

/// Extension trait for registries with statistics
pub trait RegistryStatistics: EventRegistry {
    /// Get current registry statistics
    fn stats(&self) -> RegistryStats {
        let event_types = self.event_types();
        let mut total = 0;
        let mut empty = 0;

        for event_type in &event_types {
            let count = self.listener_count(*event_type);
            total += count;
            if count == 0 {
                empty += 1;
            }
        }

        RegistryStats {
            event_types: event_types.len(),
            total_listeners: total,
            empty_collections: empty,
        }
    }
}

// Implement statistics for all registries
impl<T: EventRegistry> RegistryStatistics for T {}
