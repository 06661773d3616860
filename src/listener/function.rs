//! Closure-backed listeners.

use super::Listener;
use crate::{Event, Result};
use std::fmt;
use std::marker::PhantomData;

/// A function-based listener using closures.
///
/// ```rust
/// use event_dispatch::{Event, FunctionListener, Listener};
///
/// #[derive(Debug)]
/// struct Ping(u32);
/// impl Event for Ping {}
///
/// let listener = FunctionListener::new(|ping: &Ping| {
///     assert_eq!(ping.0, 7);
///     Ok(())
/// });
/// listener.handle(&Ping(7)).unwrap();
/// ```
pub struct FunctionListener<E, F>
where
    E: Event,
    F: Fn(&E) -> Result<()> + Send + Sync + 'static,
{
    function: F,
    name: String,
    _phantom: PhantomData<fn(&E)>,
}

impl<E, F> FunctionListener<E, F>
where
    E: Event,
    F: Fn(&E) -> Result<()> + Send + Sync + 'static,
{
    /// Create a new function listener
    pub fn new(function: F) -> Self {
        Self {
            function,
            name: format!("FunctionListener<{}>", E::event_type()),
            _phantom: PhantomData,
        }
    }

    /// Create a new function listener with a custom name
    pub fn with_name(function: F, name: impl Into<String>) -> Self {
        Self {
            function,
            name: name.into(),
            _phantom: PhantomData,
        }
    }
}

impl<E, F> Listener for FunctionListener<E, F>
where
    E: Event,
    F: Fn(&E) -> Result<()> + Send + Sync + 'static,
{
    type Event = E;

    fn handle(&self, event: &E) -> Result<()> {
        (self.function)(event)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<E, F> fmt::Debug for FunctionListener<E, F>
where
    E: Event,
    F: Fn(&E) -> Result<()> + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionListener")
            .field("name", &self.name)
            .finish()
    }
}
