//! Typed listener: hands listeners a statically-typed message.

use ibrx_core::{BoxError, IntoOutcome, Listener, Message, MessageDef};
use std::marker::PhantomData;

/// A listener that converts each message into `M` before calling `f`.
///
/// A message that cannot be read as `M` (another type, a field of the wrong
/// kind, a missing required field) fails the listener.
pub struct TypedListener<M, F> {
    f: F,
    _phantom: PhantomData<fn() -> M>,
}

impl<M, F> TypedListener<M, F> {
    /// Create a new typed listener.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: PhantomData,
        }
    }
}

/// Wrap `f` so it receives messages as `M`.
///
/// # Example
///
/// ```rust,ignore
/// let prices = typed(|tick: TickPrice| println!("{} @ {}", tick.ticker_id, tick.price));
/// receiver.register(&ListenerRef::new(prices), [TickPrice::NAME]);
/// ```
pub fn typed<M, F, R>(f: F) -> TypedListener<M, F>
where
    M: MessageDef,
    F: Fn(M) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    TypedListener::new(f)
}

impl<M, F, R> Listener for TypedListener<M, F>
where
    M: MessageDef,
    F: Fn(M) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn on_message(&self, message: &Message) -> Result<(), BoxError> {
        let typed = M::from_message(message)?;
        (self.f)(typed).into_outcome()
    }
}
