//! Error types for the event-dispatch library.

use thiserror::Error;

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for event-dispatch
///
/// Listener failures are returned to the caller of
/// [`Dispatcher::post`](crate::Dispatcher::post) exactly as the listener
/// produced them; the dispatcher never wraps or recovers them.
#[derive(Error, Debug)]
pub enum Error {
    /// A listener rejected an event with a message
    #[error("Handler error: {0}")]
    Handler(String),

    /// A listener failed with an underlying error
    #[error("Listener error: {0}")]
    Listener(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A listener entry was invoked with an event of another type
    #[error("Event type mismatch: listener expects {expected}, got {found}")]
    EventTypeMismatch {
        /// Event type the listener was declared for
        expected: &'static str,
        /// Event type that was actually supplied
        found: &'static str,
    },

    /// The deferred worker pool could not be started
    #[error("Failed to start deferred worker pool: {0}")]
    WorkerPool(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new internal error with a custom message
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// Create a new handler error
    pub fn handler(msg: impl Into<String>) -> Self {
        Error::Handler(msg.into())
    }

    /// Wrap an arbitrary error raised inside a listener
    pub fn listener<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Listener(Box::new(err))
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Check if this error was raised by a listener
    pub fn is_handler_error(&self) -> bool {
        matches!(self, Error::Handler(_) | Error::Listener(_))
    }
}
