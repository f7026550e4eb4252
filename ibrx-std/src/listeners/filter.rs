//! Filter listener for conditional message processing.

use ibrx_core::{BoxError, Listener, Message};

/// A listener that forwards only messages matching a predicate.
pub struct FilterListener<L, F> {
    inner: L,
    predicate: F,
}

impl<L, F> FilterListener<L, F> {
    /// Create a new filter listener around `inner`.
    pub fn new(inner: L, predicate: F) -> Self {
        Self { inner, predicate }
    }
}

/// Forward to `inner` only the messages for which `predicate` holds.
pub fn filter<L, F>(inner: L, predicate: F) -> FilterListener<L, F>
where
    L: Listener,
    F: Fn(&Message) -> bool + Send + Sync + 'static,
{
    FilterListener::new(inner, predicate)
}

impl<L, F> Listener for FilterListener<L, F>
where
    L: Listener,
    F: Fn(&Message) -> bool + Send + Sync + 'static,
{
    fn on_message(&self, message: &Message) -> Result<(), BoxError> {
        if (self.predicate)(message) {
            self.inner.on_message(message)
        } else {
            Ok(())
        }
    }
}
