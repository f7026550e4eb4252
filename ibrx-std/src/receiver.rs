//! # Receiver
//!
//! The receiver sits between the callback source and application code. It
//! owns the listener registry, and holds the [`TypeRegistry`] and the
//! [`DispatchSurface`] by shared reference.
//!
//! # Flow
//!
//! 1. [`Receiver::invoke`] resolves a callback name to its entry point, which
//!    binds positional values to field names.
//! 2. [`Receiver::dispatch`] looks up the message type and its listeners.
//!    Either lookup failing means nobody cares, and nothing happens.
//! 3. The message is constructed once and handed to every listener, in
//!    registration order, on the calling thread.
//!
//! # Concurrency
//!
//! The listener registry sits behind an `RwLock`, so registration works
//! through `&self` and a receiver can be shared across threads. The lock is
//! released before listeners run: a listener may register or unregister
//! (itself included) and the change applies from the next dispatch.

use crate::{
    overload::{ERROR_CALLBACK, ErrorNotification},
    registry::{TypeRegistry, default_registry},
    surface::{DispatchSurface, default_surface},
};
use ibrx_core::{
    DispatchError, FieldMap, Keyed, ListenerRef, MessageKey, SharedError, Value, key,
};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tracing::{debug, trace};

type ListenerMap = HashMap<MessageKey, Vec<ListenerRef>>;

/// Dispatches inbound callbacks to interested listeners.
pub struct Receiver {
    listeners: RwLock<ListenerMap>,
    types: Arc<TypeRegistry>,
    surface: Arc<DispatchSurface>,
}

impl Receiver {
    /// A receiver over the default registry and surface.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a receiver.
    pub fn builder() -> ReceiverBuilder {
        ReceiverBuilder::new()
    }

    /// The type registry this receiver constructs messages from.
    pub fn types(&self) -> &Arc<TypeRegistry> {
        &self.types
    }

    /// The entry points this receiver answers to.
    pub fn surface(&self) -> &Arc<DispatchSurface> {
        &self.surface
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Construct the message for `name` and deliver it to its listeners.
    ///
    /// Unknown names and types without listeners are silently ignored.
    /// Construction failures and the first listener failure propagate;
    /// listeners after a failing one are not invoked.
    pub fn dispatch(&self, name: &str, fields: FieldMap) -> Result<(), DispatchError> {
        let Some(mtype) = self.types.get(name) else {
            trace!(callback = name, "no message type, dropping callback");
            return Ok(());
        };
        let key = key(mtype);

        let listeners = match self.read().get(&key) {
            Some(listeners) => listeners.clone(),
            None => {
                trace!(callback = name, key = %key, "no listeners, dropping callback");
                return Ok(());
            }
        };

        let message = mtype
            .construct(fields)
            .map_err(|source| DispatchError::Construct {
                callback: name.to_owned(),
                source,
            })?;

        debug!(callback = name, key = %key, listeners = listeners.len(), "dispatching");
        for listener in &listeners {
            listener
                .call(&message)
                .map_err(|source| DispatchError::Listener {
                    key: key.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Deliver a callback by name with positional arguments.
    ///
    /// `error` goes through overload resolution; every other name must have
    /// an entry point on this receiver's surface.
    pub fn invoke(&self, name: &str, args: Vec<Value>) -> Result<(), DispatchError> {
        if name == ERROR_CALLBACK {
            return self.error(args);
        }
        let entry = self
            .surface
            .entry(name)
            .ok_or_else(|| DispatchError::UnknownCallback(name.to_owned()))?;
        entry.call(self, args)
    }

    // ========================================================================
    // Error callback overloads
    // ========================================================================

    /// Deliver the error callback, resolving its shape from `args`.
    pub fn error(&self, args: Vec<Value>) -> Result<(), DispatchError> {
        let notification = ErrorNotification::resolve(args)?;
        self.notify_error(notification)
    }

    /// Error callback with a single error value.
    pub fn error_value(&self, error: SharedError) -> Result<(), DispatchError> {
        self.notify_error(ErrorNotification::Value(Value::Error(error)))
    }

    /// Error callback with a message only.
    pub fn error_text(&self, message: impl Into<String>) -> Result<(), DispatchError> {
        self.notify_error(ErrorNotification::Text(message.into()))
    }

    /// Error callback with an id, an error code and a message.
    pub fn error_coded(
        &self,
        id: i64,
        error_code: i64,
        message: impl Into<String>,
    ) -> Result<(), DispatchError> {
        self.notify_error(ErrorNotification::Coded {
            id,
            error_code,
            message: message.into(),
        })
    }

    fn notify_error(&self, notification: ErrorNotification) -> Result<(), DispatchError> {
        self.dispatch(ERROR_CALLBACK, notification.into_fields())
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Subscribe `listener` to each of `types`.
    ///
    /// A listener already subscribed to a type is left where it is.
    pub fn register<I>(&self, listener: &ListenerRef, types: I)
    where
        I: IntoIterator,
        I::Item: Keyed,
    {
        let mut map = self.write();
        for mtype in types {
            let key = key(&mtype);
            let listeners = map.entry(key.clone()).or_default();
            if !listeners.contains(listener) {
                listeners.push(listener.clone());
                debug!(key = %key, listeners = listeners.len(), "listener registered");
            }
        }
    }

    /// Subscribe `listener` to every type in the registry.
    pub fn register_all(&self, listener: &ListenerRef) {
        self.register(listener, self.types.types());
    }

    /// Unsubscribe `listener` from each of `types`.
    ///
    /// Types it was not subscribed to are skipped.
    pub fn unregister<I>(&self, listener: &ListenerRef, types: I)
    where
        I: IntoIterator,
        I::Item: Keyed,
    {
        let mut map = self.write();
        for mtype in types {
            let key = key(&mtype);
            let Some(listeners) = map.get_mut(&key) else {
                continue;
            };
            if let Some(pos) = listeners.iter().position(|l| l == listener) {
                listeners.remove(pos);
                debug!(key = %key, listeners = listeners.len(), "listener unregistered");
            }
            if listeners.is_empty() {
                map.remove(&key);
            }
        }
    }

    /// Unsubscribe `listener` from every type in the registry.
    pub fn unregister_all(&self, listener: &ListenerRef) {
        self.unregister(listener, self.types.types());
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Number of listeners subscribed under the key of `mtype`.
    pub fn listener_count<K: Keyed + ?Sized>(&self, mtype: &K) -> usize {
        self.read().get(&key(mtype)).map_or(0, Vec::len)
    }

    /// Whether `listener` is subscribed under the key of `mtype`.
    pub fn is_registered<K: Keyed + ?Sized>(&self, listener: &ListenerRef, mtype: &K) -> bool {
        self.read()
            .get(&key(mtype))
            .is_some_and(|listeners| listeners.contains(listener))
    }

    /// Keys that currently have at least one listener.
    pub fn keys(&self) -> Vec<MessageKey> {
        self.read().keys().cloned().collect()
    }

    // A panicking listener never runs under the lock, so a poisoned lock
    // still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, ListenerMap> {
        self.listeners.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ListenerMap> {
        self.listeners.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Receiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Receiver")
            .field("types", &self.types.len())
            .field("entry_points", &self.surface.len())
            .field("keys", &self.keys())
            .finish()
    }
}

/// Builder for [`Receiver`].
///
/// # Example
/// ```ignore
/// let receiver = Receiver::builder()
///     .types(Arc::new(my_registry))
///     .callbacks([("tickPrice", ["tickerId", "field", "price"])])
///     .listener(printer, ["TickPrice"])
///     .build();
/// ```
#[derive(Default)]
pub struct ReceiverBuilder {
    types: Option<Arc<TypeRegistry>>,
    surface: Option<Arc<DispatchSurface>>,
    listeners: Vec<(ListenerRef, Vec<MessageKey>)>,
}

impl ReceiverBuilder {
    /// Create a builder using the default registry and surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this type registry instead of the default one.
    pub fn types(mut self, types: Arc<TypeRegistry>) -> Self {
        self.types = Some(types);
        self
    }

    /// Use a prebuilt dispatch surface.
    pub fn surface(mut self, surface: Arc<DispatchSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Build the dispatch surface from a callback argument table.
    pub fn callbacks<'a, I, A>(self, table: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, A)>,
        A: IntoIterator<Item = &'a str>,
    {
        self.surface(Arc::new(DispatchSurface::build(table)))
    }

    /// Subscribe a listener as soon as the receiver is built.
    pub fn listener<I>(mut self, listener: ListenerRef, types: I) -> Self
    where
        I: IntoIterator,
        I::Item: Keyed,
    {
        let keys = types.into_iter().map(|t| key(&t)).collect();
        self.listeners.push((listener, keys));
        self
    }

    /// Build the receiver.
    pub fn build(self) -> Receiver {
        let receiver = Receiver {
            listeners: RwLock::new(HashMap::new()),
            types: self.types.unwrap_or_else(default_registry),
            surface: self.surface.unwrap_or_else(default_surface),
        };
        for (listener, keys) in &self.listeners {
            receiver.register(listener, keys);
        }
        receiver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingListener, RecordingListener};
    use ibrx_core::{ConstructError, Message, MessageType};
    use std::sync::Mutex;

    fn tick_registry() -> Arc<TypeRegistry> {
        let mut builder = TypeRegistry::builder();
        builder
            .insert(
                "tickPrice",
                MessageType::new("TickPrice", ["tickerId", "field", "price"]),
            )
            .unwrap();
        builder
            .insert("tickSize", MessageType::new("TickSize", ["tickerId", "size"]))
            .unwrap();
        Arc::new(builder.build())
    }

    fn receiver() -> Receiver {
        Receiver::builder()
            .types(tick_registry())
            .callbacks([
                ("tickPrice", vec!["tickerId", "field", "price"]),
                ("tickSize", vec!["tickerId", "size"]),
            ])
            .build()
    }

    fn fields<const N: usize>(pairs: [(&str, Value); N]) -> FieldMap {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect()
    }

    #[test]
    fn test_dispatch_reaches_registered_listener() {
        let receiver = receiver();
        let recorder = RecordingListener::new();
        receiver.register(&recorder.handle(), ["TickPrice"]);

        receiver
            .dispatch("tickPrice", fields([("tickerId", Value::from(42))]))
            .unwrap();
        receiver
            .dispatch("tickSize", fields([("size", Value::from(5))]))
            .unwrap();

        let messages = recorder.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].is("TickPrice"));
        assert_eq!(messages[0].get("tickerId"), Some(&Value::Int(42)));
    }

    #[test]
    fn test_dispatch_unknown_name_is_silent() {
        let receiver = receiver();
        let recorder = RecordingListener::new();
        receiver.register_all(&recorder.handle());

        receiver.dispatch("tickNews", FieldMap::new()).unwrap();
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn test_no_listeners_skips_construction() {
        let receiver = receiver();
        // Would fail to construct if anyone were listening.
        receiver
            .dispatch("tickPrice", fields([("bogus", Value::from(1))]))
            .unwrap();
    }

    #[test]
    fn test_construction_failure_propagates() {
        let receiver = receiver();
        receiver.register(&RecordingListener::new().handle(), ["TickPrice"]);

        let err = receiver
            .dispatch("tickPrice", fields([("bogus", Value::from(1))]))
            .unwrap_err();
        let DispatchError::Construct { callback, source } = err else {
            panic!("unexpected error variant");
        };
        assert_eq!(callback, "tickPrice");
        assert!(matches!(source, ConstructError::UnexpectedField { .. }));
    }

    #[test]
    fn test_register_is_idempotent() {
        let receiver = receiver();
        let recorder = RecordingListener::new();
        let handle = recorder.handle();
        receiver.register(&handle, ["TickPrice"]);
        receiver.register(&handle, ["TickPrice", "TickPrice"]);

        assert_eq!(receiver.listener_count("TickPrice"), 1);
        receiver.dispatch("tickPrice", FieldMap::new()).unwrap();
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn test_types_and_names_share_keys() {
        let receiver = receiver();
        let handle = RecordingListener::new().handle();
        let mtype = receiver.types().get("tickPrice").unwrap().clone();

        receiver.register(&handle, [&mtype]);
        assert!(receiver.is_registered(&handle, "TickPrice"));
        receiver.unregister(&handle, ["TickPrice"]);
        assert!(!receiver.is_registered(&handle, &mtype));
    }

    #[test]
    fn test_order_and_reregistration() {
        let receiver = receiver();
        let order = Arc::new(Mutex::new(Vec::new()));
        let make = |id: u8| {
            let order = order.clone();
            ListenerRef::new(move |_: &Message| order.lock().unwrap().push(id))
        };
        let (first, second) = (make(1), make(2));
        receiver.register(&first, ["TickPrice"]);
        receiver.register(&second, ["TickPrice"]);
        receiver.dispatch("tickPrice", FieldMap::new()).unwrap();

        receiver.unregister(&first, ["TickPrice"]);
        receiver.register(&first, ["TickPrice"]);
        receiver.dispatch("tickPrice", FieldMap::new()).unwrap();

        assert_eq!(*order.lock().unwrap(), [1, 2, 2, 1]);
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let receiver = receiver();
        let handle = RecordingListener::new().handle();
        receiver.unregister(&handle, ["TickPrice", "NeverHeardOfIt"]);
        receiver.unregister_all(&handle);
        assert!(receiver.keys().is_empty());
    }

    #[test]
    fn test_register_all_and_unregister_all() {
        let receiver = receiver();
        let recorder = RecordingListener::new();
        let handle = recorder.handle();

        receiver.register_all(&handle);
        receiver.dispatch("tickPrice", FieldMap::new()).unwrap();
        receiver.dispatch("tickSize", FieldMap::new()).unwrap();
        assert_eq!(recorder.count(), 2);

        receiver.unregister_all(&handle);
        receiver.dispatch("tickPrice", FieldMap::new()).unwrap();
        assert_eq!(recorder.count(), 2);
        assert!(receiver.keys().is_empty());
    }

    #[test]
    fn test_listener_failure_stops_fanout() {
        let receiver = receiver();
        let before = RecordingListener::new();
        let after = RecordingListener::new();
        let failing = FailingListener::new("feed handler crashed");

        receiver.register(&before.handle(), ["TickPrice"]);
        receiver.register(&failing.handle(), ["TickPrice"]);
        receiver.register(&after.handle(), ["TickPrice"]);

        let err = receiver.dispatch("tickPrice", FieldMap::new()).unwrap_err();
        assert!(matches!(err, DispatchError::Listener { ref key, .. } if key.as_str() == "TickPrice"));
        assert_eq!(before.count(), 1);
        assert_eq!(failing.count(), 1);
        assert_eq!(after.count(), 0);
    }

    #[test]
    fn test_listener_can_unregister_itself() {
        let receiver = Arc::new(receiver());
        let slot: Arc<Mutex<Option<ListenerRef>>> = Arc::new(Mutex::new(None));
        let once = {
            let receiver = Arc::downgrade(&receiver);
            let slot = slot.clone();
            ListenerRef::new(move |_: &Message| {
                let me = slot.lock().unwrap().clone();
                if let (Some(receiver), Some(me)) = (receiver.upgrade(), me) {
                    receiver.unregister(&me, ["TickPrice"]);
                }
            })
        };
        *slot.lock().unwrap() = Some(once.clone());

        receiver.register(&once, ["TickPrice"]);
        receiver.dispatch("tickPrice", FieldMap::new()).unwrap();
        assert_eq!(receiver.listener_count("TickPrice"), 0);
    }

    #[test]
    fn test_invoke_unknown_callback() {
        let receiver = receiver();
        assert!(matches!(
            receiver.invoke("tickNews", vec![]),
            Err(DispatchError::UnknownCallback(name)) if name == "tickNews"
        ));
    }

    #[test]
    fn test_builder_preregisters_listeners() {
        let recorder = RecordingListener::new();
        let receiver = Receiver::builder()
            .types(tick_registry())
            .listener(recorder.handle(), ["TickSize"])
            .build();

        assert!(receiver.is_registered(&recorder.handle(), "TickSize"));
    }
}
