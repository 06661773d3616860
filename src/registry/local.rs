//! Single-threaded registry with no internal locking.

use super::{CollectionKind, EventRegistry, ListenerSet};
use crate::listener::ListenerEntry;
use crate::EventTypeKey;
use fxhash::FxHashMap;
use std::cell::RefCell;
use tracing::{debug, trace};

/// An event registry for use from a single thread.
///
/// Backed by an `FxHashMap` in a `RefCell`. The registry can be moved to
/// another thread but not shared between threads, so unsynchronised
/// concurrent access is rejected at compile time.
///
/// Borrows never outlive a single method call, which keeps registration from
/// inside a running listener legal.
#[derive(Debug)]
pub struct LocalRegistry {
    listeners: RefCell<FxHashMap<EventTypeKey, ListenerSet>>,
    kind: CollectionKind,
}

impl LocalRegistry {
    /// Create a new empty registry with ordered collections
    pub fn new() -> Self {
        Self::with_kind(CollectionKind::default())
    }
}

impl Default for LocalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRegistry for LocalRegistry {
    const CONCURRENT: bool = false;

    fn with_kind(kind: CollectionKind) -> Self {
        Self {
            listeners: RefCell::new(FxHashMap::default()),
            kind,
        }
    }

    fn collection_kind(&self) -> CollectionKind {
        self.kind
    }

    fn register(&self, entry: ListenerEntry) -> bool {
        let event_type = entry.event_type();
        let listener_id = entry.id();

        trace!(%listener_id, %event_type, "Registering listener");

        let inserted = self
            .listeners
            .borrow_mut()
            .entry(event_type)
            .or_insert_with(|| ListenerSet::new(self.kind))
            .insert(entry);

        debug!(%listener_id, %event_type, inserted, "Listener registered");
        inserted
    }

    fn unregister(&self, entry: &ListenerEntry) -> bool {
        let event_type = entry.event_type();
        let listener_id = entry.id();

        let removed = self
            .listeners
            .borrow_mut()
            .get_mut(&event_type)
            .map(|set| set.remove(listener_id))
            .unwrap_or(false);

        debug!(%listener_id, %event_type, removed, "Listener unregistered");
        removed
    }

    fn listeners(&self, event_type: EventTypeKey) -> Vec<ListenerEntry> {
        self.listeners
            .borrow()
            .get(&event_type)
            .map(ListenerSet::snapshot)
            .unwrap_or_default()
    }

    fn listener_count(&self, event_type: EventTypeKey) -> usize {
        self.listeners
            .borrow()
            .get(&event_type)
            .map(ListenerSet::len)
            .unwrap_or(0)
    }

    fn has_listeners(&self, event_type: EventTypeKey) -> bool {
        self.listeners
            .borrow()
            .get(&event_type)
            .is_some_and(|set| !set.is_empty())
    }

    fn total_listeners(&self) -> usize {
        self.listeners.borrow().values().map(ListenerSet::len).sum()
    }

    fn event_types(&self) -> Vec<EventTypeKey> {
        self.listeners.borrow().keys().copied().collect()
    }

    fn clear(&self) {
        self.listeners.borrow_mut().clear();
        debug!("All listeners unregistered");
    }
}
