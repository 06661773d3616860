//! Core event trait and the type key events are routed by.
//!
//! Any `Send + Sync + Debug + 'static` value can be an event. Routing is by
//! exact type: a listener declared for `Ping` never sees a `Pong`, nor a
//! newtype wrapping `Ping`.

use std::fmt::Debug;

pub mod key;

pub use key::EventTypeKey;

/// Core trait that all events must implement.
///
/// # Example
///
/// ```rust
/// use event_dispatch::Event;
///
/// #[derive(Debug)]
/// struct UserRegistered {
///     user_id: u64,
/// }
///
/// impl Event for UserRegistered {
///     fn event_type() -> &'static str {
///         "UserRegistered"
///     }
/// }
///
/// // The default name is the Rust type name.
/// #[derive(Debug)]
/// struct Tick;
/// impl Event for Tick {}
/// ```
pub trait Event: Send + Sync + Debug + 'static {
    /// Returns the type name of this event.
    ///
    /// Only used for logging and error messages; routing never looks at it.
    fn event_type() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }

    /// Get the routing key for this event type.
    fn type_key() -> EventTypeKey
    where
        Self: Sized,
    {
        EventTypeKey::of::<Self>()
    }
}
