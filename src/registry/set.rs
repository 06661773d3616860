//! Per-type listener collections.

use crate::listener::{ListenerEntry, ListenerId};
use fxhash::FxHashMap;

/// How a registry stores the listeners of one event type.
///
/// The kind decides both the duplicate policy and the delivery order, and is
/// fixed when the dispatcher is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollectionKind {
    /// Insertion order, duplicates allowed: registering the same listener
    /// twice delivers each event to it twice.
    #[default]
    Ordered,

    /// Insertion order, registering an already registered listener is a no-op.
    Deduplicated,

    /// Hash-set semantics: deduplicating, iteration order unspecified.
    Unordered,
}

impl CollectionKind {
    /// Whether registering the same listener twice is collapsed into one
    pub fn deduplicates(&self) -> bool {
        !matches!(self, CollectionKind::Ordered)
    }

    /// Whether listeners are invoked in registration order
    pub fn preserves_order(&self) -> bool {
        !matches!(self, CollectionKind::Unordered)
    }
}

/// The listeners registered for one event type.
#[derive(Debug, Clone)]
pub(crate) enum ListenerSet {
    Ordered(Vec<ListenerEntry>),
    Deduplicated(Vec<ListenerEntry>),
    Unordered(FxHashMap<ListenerId, ListenerEntry>),
}

impl ListenerSet {
    pub(crate) fn new(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::Ordered => ListenerSet::Ordered(Vec::new()),
            CollectionKind::Deduplicated => ListenerSet::Deduplicated(Vec::new()),
            CollectionKind::Unordered => ListenerSet::Unordered(FxHashMap::default()),
        }
    }

    /// Add a listener; returns false if the set already held it and
    /// deduplicates.
    pub(crate) fn insert(&mut self, entry: ListenerEntry) -> bool {
        match self {
            ListenerSet::Ordered(entries) => {
                entries.push(entry);
                true
            }
            ListenerSet::Deduplicated(entries) => {
                if entries.iter().any(|e| e.id() == entry.id()) {
                    false
                } else {
                    entries.push(entry);
                    true
                }
            }
            ListenerSet::Unordered(entries) => entries.insert(entry.id(), entry).is_none(),
        }
    }

    /// Remove every occurrence of the listener; returns whether any was found.
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        match self {
            ListenerSet::Ordered(entries) | ListenerSet::Deduplicated(entries) => {
                let before = entries.len();
                entries.retain(|e| e.id() != id);
                entries.len() != before
            }
            ListenerSet::Unordered(entries) => entries.remove(&id).is_some(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            ListenerSet::Ordered(entries) | ListenerSet::Deduplicated(entries) => entries.len(),
            ListenerSet::Unordered(entries) => entries.len(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone the entries out in iteration order.
    pub(crate) fn snapshot(&self) -> Vec<ListenerEntry> {
        match self {
            ListenerSet::Ordered(entries) | ListenerSet::Deduplicated(entries) => entries.clone(),
            ListenerSet::Unordered(entries) => entries.values().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Event;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct Ping;
    impl Event for Ping {}

    fn entry() -> ListenerEntry {
        ListenerEntry::from_fn(|_: &Ping| Ok(()))
    }

    fn ids(set: &ListenerSet) -> Vec<ListenerId> {
        set.snapshot().iter().map(|e| e.id()).collect()
    }

    #[test]
    fn test_ordered_keeps_duplicates_in_order() {
        let (a, b) = (entry(), entry());
        let mut set = ListenerSet::new(CollectionKind::Ordered);

        assert!(set.insert(a.clone()));
        assert!(set.insert(b.clone()));
        assert!(set.insert(a.clone()));

        assert_eq!(ids(&set), vec![a.id(), b.id(), a.id()]);
    }

    #[test]
    fn test_deduplicated_ignores_second_insert() {
        let (a, b) = (entry(), entry());
        let mut set = ListenerSet::new(CollectionKind::Deduplicated);

        assert!(set.insert(a.clone()));
        assert!(set.insert(b.clone()));
        assert!(!set.insert(a.clone()));

        assert_eq!(ids(&set), vec![a.id(), b.id()]);
    }

    #[test]
    fn test_unordered_deduplicates() {
        let a = entry();
        let mut set = ListenerSet::new(CollectionKind::Unordered);

        assert!(set.insert(a.clone()));
        assert!(!set.insert(a.clone()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_drops_every_occurrence() {
        let (a, b) = (entry(), entry());
        let mut set = ListenerSet::new(CollectionKind::Ordered);
        set.insert(a.clone());
        set.insert(b.clone());
        set.insert(a.clone());

        assert!(set.remove(a.id()));
        assert_eq!(ids(&set), vec![b.id()]);
        assert!(!set.remove(a.id()));

        assert!(set.remove(b.id()));
        assert!(set.is_empty());
    }

    #[test]
    fn test_kind_flags() {
        assert!(!CollectionKind::Ordered.deduplicates());
        assert!(CollectionKind::Deduplicated.deduplicates());
        assert!(CollectionKind::Unordered.deduplicates());
        assert!(CollectionKind::Ordered.preserves_order());
        assert!(!CollectionKind::Unordered.preserves_order());
        assert_eq!(CollectionKind::default(), CollectionKind::Ordered);
    }
}
