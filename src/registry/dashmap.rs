//! DashMap-based implementation of EventRegistry for concurrent access.

use super::{CollectionKind, EventRegistry, ListenerSet};
use crate::listener::ListenerEntry;
use crate::EventTypeKey;
use dashmap::DashMap;
use tracing::{debug, trace};

/// A thread-safe event registry implementation using DashMap.
///
/// Suited to many readers (posting) and fewer writers (registering and
/// unregistering). Every operation locks at most one shard, and never while a
/// listener runs.
#[derive(Debug)]
pub struct ConcurrentRegistry {
    /// Map from event type to its listeners
    listeners: DashMap<EventTypeKey, ListenerSet>,

    kind: CollectionKind,
}

impl ConcurrentRegistry {
    /// Create a new empty registry with ordered collections
    pub fn new() -> Self {
        Self::with_kind(CollectionKind::default())
    }

    /// Create a registry with pre-allocated capacity for `capacity` event types
    pub fn with_capacity(kind: CollectionKind, capacity: usize) -> Self {
        Self {
            listeners: DashMap::with_capacity(capacity),
            kind,
        }
    }
}

impl Default for ConcurrentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRegistry for ConcurrentRegistry {
    const CONCURRENT: bool = true;

    fn with_kind(kind: CollectionKind) -> Self {
        Self {
            listeners: DashMap::new(),
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
            .entry(event_type)
            .or_insert_with(|| ListenerSet::new(self.kind))
            .insert(entry);

        debug!(%listener_id, %event_type, inserted, "Listener registered");
        inserted
    }

    fn unregister(&self, entry: &ListenerEntry) -> bool {
        let event_type = entry.event_type();
        let listener_id = entry.id();

        trace!(%listener_id, %event_type, "Unregistering listener");

        let removed = self
            .listeners
            .get_mut(&event_type)
            .map(|mut set| set.remove(listener_id))
            .unwrap_or(false);

        debug!(%listener_id, %event_type, removed, "Listener unregistered");
        removed
    }

    fn listeners(&self, event_type: EventTypeKey) -> Vec<ListenerEntry> {
        self.listeners
            .get(&event_type)
            .map(|set| set.snapshot())
            .unwrap_or_default()
    }

    fn listener_count(&self, event_type: EventTypeKey) -> usize {
        self.listeners
            .get(&event_type)
            .map(|set| set.len())
            .unwrap_or(0)
    }

    fn has_listeners(&self, event_type: EventTypeKey) -> bool {
        self.listeners
            .get(&event_type)
            .is_some_and(|set| !set.is_empty())
    }

    fn total_listeners(&self) -> usize {
        self.listeners.iter().map(|set| set.len()).sum()
    }

    fn event_types(&self) -> Vec<EventTypeKey> {
        self.listeners.iter().map(|entry| *entry.key()).collect()
    }

    fn clear(&self) {
        self.listeners.clear();
        debug!("All listeners unregistered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Event;
    use std::sync::Arc;

    #[derive(Debug)]
    struct TestEvent;

    impl Event for TestEvent {
        fn event_type() -> &'static str {
            "TestEvent"
        }
    }

    #[derive(Debug)]
    struct AnotherEvent;

    impl Event for AnotherEvent {
        fn event_type() -> &'static str {
            "AnotherEvent"
        }
    }

    fn listener() -> ListenerEntry {
        ListenerEntry::from_fn(|_: &TestEvent| Ok(()))
    }

    #[test]
    fn test_register_and_get() {
        let registry = ConcurrentRegistry::new();
        let entry = listener();

        assert!(registry.register(entry.clone()));

        let listeners = registry.listeners(TestEvent::type_key());
        assert_eq!(listeners.len(), 1);
        assert_eq!(listeners[0].id(), entry.id());
    }

    #[test]
    fn test_unregister() {
        let registry = ConcurrentRegistry::new();
        let entry = listener();

        registry.register(entry.clone());
        assert_eq!(registry.total_listeners(), 1);
        assert!(registry.has_listeners(TestEvent::type_key()));

        assert!(registry.unregister(&entry));
        assert_eq!(registry.total_listeners(), 0);
        assert!(registry.listeners(TestEvent::type_key()).is_empty());
        assert!(!registry.has_listeners(TestEvent::type_key()));
        assert!(!registry.has_listeners(AnotherEvent::type_key()));

        // The emptied collection stays behind
        assert_eq!(registry.event_types().len(), 1);
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let registry = ConcurrentRegistry::new();
        assert!(!registry.unregister(&listener()));
        assert!(registry.event_types().is_empty());
    }

    #[test]
    fn test_multiple_listeners() {
        let registry = ConcurrentRegistry::new();

        for i in 0..3 {
            registry.register(ListenerEntry::named(
                format!("handler-{}", i),
                |_: &TestEvent| Ok(()),
            ));
        }
        registry.register(ListenerEntry::from_fn(|_: &AnotherEvent| Ok(())));

        assert_eq!(registry.listener_count(TestEvent::type_key()), 3);
        assert_eq!(registry.listener_count(AnotherEvent::type_key()), 1);
        assert_eq!(registry.total_listeners(), 4);
        assert_eq!(registry.event_types().len(), 2);

        let names: Vec<_> = registry
            .listeners(TestEvent::type_key())
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["handler-0", "handler-1", "handler-2"]);
    }

    #[test]
    fn test_deduplicated_kind() {
        let registry = ConcurrentRegistry::with_kind(CollectionKind::Deduplicated);
        let entry = listener();

        assert!(registry.register(entry.clone()));
        assert!(!registry.register(entry.clone()));
        assert_eq!(registry.listener_count(TestEvent::type_key()), 1);
        assert_eq!(registry.collection_kind(), CollectionKind::Deduplicated);
    }

    #[test]
    fn test_clear() {
        let registry = ConcurrentRegistry::with_capacity(CollectionKind::Ordered, 4);
        registry.register(listener());
        registry.register(ListenerEntry::from_fn(|_: &AnotherEvent| Ok(())));

        registry.clear();
        assert_eq!(registry.total_listeners(), 0);
        assert!(registry.event_types().is_empty());
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(ConcurrentRegistry::new());

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let registry = registry.clone();
                scope.spawn(move || {
                    for _ in 0..50 {
                        let entry = ListenerEntry::from_fn(|_: &TestEvent| Ok(()));
                        registry.register(entry.clone());
                        let _ = registry.listeners(TestEvent::type_key());
                        registry.unregister(&entry);
                        registry.register(entry);
                    }
                });
            }
        });

        assert_eq!(registry.listener_count(TestEvent::type_key()), 8 * 50);
    }
}
