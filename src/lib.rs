//! # event-dispatch
//!
//! A small, type-keyed, in-process event dispatcher.
//!
//! Listeners declare the exact event type they handle and are registered with
//! a [`Dispatcher`]. Posting an event invokes every listener registered for
//! that exact type, in registration order.
//!
//! ## Features
//!
//! - **Exact-type routing** keyed by `TypeId`
//! - **Two variants**: [`SyncDispatcher`] for shared, concurrent use and
//!   [`LocalDispatcher`] for lock-free single-threaded use
//! - **Deferred posting** on a lazily started worker pool
//! - **Configurable collections**: ordered, deduplicated or unordered
//!
//! ## Quick Example
//!
//! ```rust
//! use event_dispatch::{Dispatcher, Event, ListenerEntry};
//!
//! #[derive(Debug)]
//! struct UserRegistered {
//!     user_id: u64,
//! }
//!
//! impl Event for UserRegistered {}
//!
//! fn main() -> event_dispatch::Result<()> {
//!     let dispatcher = Dispatcher::synchronised();
//!
//!     let welcome = ListenerEntry::named("welcome", |event: &UserRegistered| {
//!         println!("welcome, user {}", event.user_id);
//!         Ok(())
//!     });
//!     dispatcher.register(&welcome);
//!
//!     dispatcher.post(&UserRegistered { user_id: 123 })?;
//!
//!     dispatcher.unregister(&welcome);
//!     Ok(())
//! }
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    unreachable_pub
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Core event trait and type keys
pub mod event;

/// Error types and result aliases
pub mod error;

/// Listener capability and registrable entries
pub mod listener;

/// Event registry for type-to-listener mapping
pub mod registry;

/// The dispatcher, its configuration and worker pool
pub mod dispatcher;

// Re-export commonly used types
pub use dispatcher::{
    Dispatcher, DispatcherBuilder, DispatcherConfig, DispatcherStats, LocalDispatcher,
    SyncDispatcher, WorkerConfig,
};
pub use error::{Error, Result};
pub use event::{Event, EventTypeKey};
pub use listener::{FunctionListener, Listener, ListenerEntry, ListenerId};
pub use registry::{CollectionKind, ConcurrentRegistry, EventRegistry, LocalRegistry};

/// Prelude module for convenient imports
///
/// # Example
/// ```rust
/// use event_dispatch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::dispatcher::{Dispatcher, LocalDispatcher, SyncDispatcher};
    pub use crate::error::{Error, Result};
    pub use crate::event::Event;
    pub use crate::listener::{Listener, ListenerEntry};
    pub use crate::registry::CollectionKind;
}
