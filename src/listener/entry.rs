//! Type-erased listener entries.

use super::{FunctionListener, Listener, ListenerId};
use crate::{Error, Event, EventTypeKey, Result};
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Object-safe view of a [`Listener`] with its event type erased.
trait ErasedListener: Send + Sync {
    fn invoke(&self, event: &dyn Any, found: &'static str) -> Result<()>;

    fn name(&self) -> &str;
}

/// Adapter that converts a typed [`Listener`] into an [`ErasedListener`]
struct TypedListener<L: Listener> {
    listener: Arc<L>,
}

impl<L: Listener> ErasedListener for TypedListener<L> {
    fn invoke(&self, event: &dyn Any, found: &'static str) -> Result<()> {
        match event.downcast_ref::<L::Event>() {
            Some(event) => self.listener.handle(event),
            None => Err(Error::EventTypeMismatch {
                expected: L::Event::event_type(),
                found,
            }),
        }
    }

    fn name(&self) -> &str {
        self.listener.name()
    }
}

/// A registrable listener: its event type key paired with its handling
/// function.
///
/// Entries are cheap to clone and every clone shares the same [`ListenerId`],
/// so registering a clone counts as registering the same listener again.
/// The consumer keeps ownership; a dispatcher only holds a clone while the
/// entry is registered.
///
/// ```rust
/// use event_dispatch::{Event, ListenerEntry};
///
/// #[derive(Debug)]
/// struct Ping;
/// impl Event for Ping {}
///
/// let entry = ListenerEntry::from_fn(|_: &Ping| Ok(()));
/// assert!(entry.event_type().is::<Ping>());
/// assert_eq!(entry.clone(), entry);
/// ```
#[derive(Clone)]
pub struct ListenerEntry {
    id: ListenerId,
    event_type: EventTypeKey,
    listener: Arc<dyn ErasedListener>,
}

impl ListenerEntry {
    /// Create an entry from a [`Listener`] implementation
    pub fn new<L: Listener>(listener: L) -> Self {
        Self::from_arc(Arc::new(listener))
    }

    /// Create an entry from a shared [`Listener`]
    ///
    /// Each call yields a new identity, even for the same `Arc`.
    pub fn from_arc<L: Listener>(listener: Arc<L>) -> Self {
        Self {
            id: ListenerId::new(),
            event_type: EventTypeKey::of::<L::Event>(),
            listener: Arc::new(TypedListener { listener }),
        }
    }

    /// Create an entry from a closure
    pub fn from_fn<E, F>(function: F) -> Self
    where
        E: Event,
        F: Fn(&E) -> Result<()> + Send + Sync + 'static,
    {
        Self::new(FunctionListener::new(function))
    }

    /// Create an entry from a closure with a name used in logs
    pub fn named<E, F>(name: impl Into<String>, function: F) -> Self
    where
        E: Event,
        F: Fn(&E) -> Result<()> + Send + Sync + 'static,
    {
        Self::new(FunctionListener::with_name(function, name))
    }

    /// Identity shared by all clones of this entry
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// The exact event type this entry receives
    pub fn event_type(&self) -> EventTypeKey {
        self.event_type
    }

    /// Listener name for logging
    pub fn name(&self) -> &str {
        self.listener.name()
    }

    /// Invoke the handling function directly.
    ///
    /// Fails with [`Error::EventTypeMismatch`] if `E` is not the declared
    /// event type; otherwise returns whatever the listener returns.
    pub fn invoke<E: Event>(&self, event: &E) -> Result<()> {
        self.listener.invoke(event, E::event_type())
    }
}

impl PartialEq for ListenerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ListenerEntry {}

impl Hash for ListenerEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ListenerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerEntry")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("event_type", &self.event_type)
            .finish()
    }
}
