//! Listener capability and the entries the registry stores.
//!
//! A [`Listener`] declares the exact event type it receives through its
//! associated `Event` type and handles one event at a time. Consumers wrap a
//! listener in a [`ListenerEntry`], which is what gets registered with a
//! [`Dispatcher`](crate::Dispatcher).

use crate::{Event, EventTypeKey, Result};
use std::fmt;
use uuid::Uuid;

pub mod entry;
pub mod function;

pub use entry::ListenerEntry;
pub use function::FunctionListener;

/// A consumer-supplied handler for a single event type.
///
/// Returning `Err` from [`handle`](Listener::handle) aborts delivery of that
/// post to every listener ordered after this one, and the error reaches the
/// caller of [`post`](crate::Dispatcher::post) unchanged.
///
/// # Example
///
/// ```rust
/// use event_dispatch::{Event, Listener, Result};
///
/// #[derive(Debug)]
/// struct Ping;
/// impl Event for Ping {}
///
/// struct PingLogger;
///
/// impl Listener for PingLogger {
///     type Event = Ping;
///
///     fn handle(&self, event: &Ping) -> Result<()> {
///         println!("got {:?}", event);
///         Ok(())
///     }
/// }
/// ```
pub trait Listener: Send + Sync + 'static {
    /// The exact event type this listener receives
    type Event: Event;

    /// Handle one event
    fn handle(&self, event: &Self::Event) -> Result<()>;

    /// Get the listener name for logging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Routing key of [`Listener::Event`]
    fn event_type(&self) -> EventTypeKey {
        EventTypeKey::of::<Self::Event>()
    }
}

/// Identity of a [`ListenerEntry`].
///
/// Assigned once when the entry is created and shared by all of its clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(Uuid);

impl ListenerId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
