//! Runtime identity of an event type.

use super::Event;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The key the registry groups listeners under.
///
/// Wraps the [`TypeId`] of the event type together with its
/// [`Event::event_type`] name. Only the `TypeId` takes part in equality and
/// hashing, so two keys are equal iff they name the exact same type.
#[derive(Clone, Copy)]
pub struct EventTypeKey {
    id: TypeId,
    name: &'static str,
}

impl EventTypeKey {
    /// Key for the event type `E`
    pub fn of<E: Event>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: E::event_type(),
        }
    }

    /// The underlying `TypeId`
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Human-readable event type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check if this key belongs to the event type `E`
    pub fn is<E: Event>(&self) -> bool {
        self.id == TypeId::of::<E>()
    }
}

impl PartialEq for EventTypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventTypeKey {}

impl Hash for EventTypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EventTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventTypeKey").field(&self.name).finish()
    }
}

impl fmt::Display for EventTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
