//! # Listeners
//!
//! A Listener is application code interested in a subset of inbound
//! messages. It receives each constructed [`Message`] by reference, on the
//! thread that delivered the callback, in registration order.
//!
//! A listener that fails stops the fan-out: the error is handed back to
//! whoever delivered the callback, and listeners registered after it do not
//! see the message.
//!
//! [`Message`]: crate::Message

use crate::{error::BoxError, message::Message};
use std::{any::TypeId, fmt, mem, sync::Arc};

/// Application code that consumes messages.
///
/// Implemented for every closure `Fn(&Message) -> R` where `R` is `()` or a
/// `Result<(), E>`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Listener`",
    label = "missing `Listener` implementation",
    note = "Listeners take `&Message` and return `()` or `Result<(), E>`."
)]
pub trait Listener: Send + Sync + 'static {
    /// Handle one message.
    fn on_message(&self, message: &Message) -> Result<(), BoxError>;
}

/// Conversion of a listener's return value into its outcome.
pub trait IntoOutcome {
    /// Convert into the listener outcome.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> IntoOutcome for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

// Blanket impl for closures
impl<F, R> Listener for F
where
    F: Fn(&Message) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn on_message(&self, message: &Message) -> Result<(), BoxError> {
        (self)(message).into_outcome()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Identity {
    /// Stateless listeners (fn items, closures capturing nothing) are
    /// interchangeable, so their type is their identity.
    Stateless(TypeId),
    /// Anything else is identified by its allocation.
    Shared(usize),
}

/// A shared handle to a listener.
///
/// Handles compare equal when they refer to the same listener, which is how
/// the receiver suppresses duplicate registrations. A handle to a stateless
/// listener, such as a plain `fn`, equals every other handle to that same
/// function. Listeners holding state only equal clones of their own handle,
/// so keep the handle around to unregister them later.
#[derive(Clone)]
pub struct ListenerRef {
    inner: Arc<dyn Listener>,
    identity: Identity,
}

impl ListenerRef {
    /// Wrap a listener in a new handle.
    pub fn new<L: Listener>(listener: L) -> Self {
        if mem::size_of::<L>() == 0 {
            Self {
                inner: Arc::new(listener),
                identity: Identity::Stateless(TypeId::of::<L>()),
            }
        } else {
            Self::from_arc(Arc::new(listener))
        }
    }

    /// Wrap an already shared listener.
    pub fn from_arc(inner: Arc<dyn Listener>) -> Self {
        let identity = Identity::Shared(Arc::as_ptr(&inner).cast::<()>() as usize);
        Self { inner, identity }
    }

    /// Invoke the listener.
    pub fn call(&self, message: &Message) -> Result<(), BoxError> {
        self.inner.on_message(message)
    }
}

impl PartialEq for ListenerRef {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for ListenerRef {}

impl fmt::Debug for ListenerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ListenerRef").field(&self.identity).finish()
    }
}

impl Listener for ListenerRef {
    fn on_message(&self, message: &Message) -> Result<(), BoxError> {
        self.call(message)
    }
}
