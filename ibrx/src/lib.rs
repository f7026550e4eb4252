//! # ibrx - Inbound Callback Dispatch
//!
//! `ibrx` turns loosely-typed callbacks from a trading API wrapper (a name
//! plus positional arguments) into messages, and routes each message to the
//! listeners that registered interest in its type.
//!
//! ## Quick Start
//!
//! ```rust
//! use ibrx::{ListenerRef, Message, Receiver, Value};
//!
//! let receiver = Receiver::new();
//! let printer = ListenerRef::new(|m: &Message| println!("{m}"));
//! receiver.register(&printer, ["TickPrice"]);
//!
//! // Delivered by the callback source:
//! receiver
//!     .invoke("tickPrice", vec![Value::from(42), Value::from(1), Value::from(101.5)])
//!     .unwrap();
//! ```
//!
//! ## Typed Messages
//!
//! ```rust,ignore
//! #[derive(ibrx::Message)]
//! struct TickPrice {
//!     ticker_id: i64,
//!     field: i64,
//!     price: f64,
//!     can_auto_execute: Option<bool>,
//! }
//!
//! let prices = ListenerRef::new(typed(|t: TickPrice| println!("{}", t.price)));
//! receiver.register(&prices, [TickPrice::NAME]);
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use ibrx_core::{
    // Error types
    BoxError,
    ConstructError,
    DispatchError,
    // Values
    FieldMap,
    FromValue,
    // Listeners
    IntoOutcome,
    // Keys
    Keyed,
    Listener,
    ListenerRef,
    // Messages
    Message,
    MessageDef,
    MessageKey,
    MessageType,
    OverloadError,
    RegistryError,
    SharedError,
    SharedObject,
    Value,
    ValueKind,
    key,
};

pub use ibrx_std::{
    DispatchSurface, ERROR_CALLBACK, EntryPoint, ErrorMessage, ErrorNotification, Receiver,
    ReceiverBuilder, TypeRegistry, TypeRegistryBuilder, default_registry, default_surface,
};

/// The default callback argument table.
pub mod catalogue {
    pub use ibrx_std::catalogue::{ERROR_FIELDS, WRAPPER_METHODS, type_name, wrapper_methods};
}

/// Standard listener implementations.
pub mod listeners {
    pub use ibrx_std::listeners::{
        ChannelClosed, ChannelListener, FilterListener, TypedListener, channel, filter, typed,
    };
}

/// Testing utilities.
pub mod testing {
    pub use ibrx_std::testing::{FailingListener, RecordingListener};
}

/// Prelude module - common imports for ibrx.
///
/// # Usage
///
/// ```rust,ignore
/// use ibrx::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        DispatchError, Keyed, Listener, ListenerRef, Message, MessageDef, MessageType, Receiver,
        TypeRegistry, Value,
        listeners::{channel, filter, typed},
    };
}

#[cfg(feature = "macros")]
pub use ibrx_macros::Message;
