//! # ibrx-core
//!
//! Core types for the ibrx inbound callback dispatcher.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that only needs to *consume* messages (listeners, typed message
//! definitions) without pulling in the receiver itself.
//!
//! # Building Blocks
//!
//! ## Values ([`Value`], [`FieldMap`])
//!
//! Callbacks arrive loosely typed: a name plus positional arguments. Each
//! argument is a [`Value`]; once paired with its declared argument name it
//! lands in a [`FieldMap`].
//!
//! ## Message Types ([`MessageType`], [`MessageDef`])
//!
//! A [`MessageType`] is the runtime descriptor of a message: its declared
//! name and its ordered field list. Constructing it from a [`FieldMap`]
//! yields a [`Message`]. [`MessageDef`] is the statically-typed counterpart,
//! implemented for plain structs (usually via `#[derive(Message)]`).
//!
//! ## Keys ([`Keyed`], [`MessageKey`])
//!
//! Listeners are stored under a [`MessageKey`]. Anything that is [`Keyed`]
//! (a message type, a message, a bare name) can be turned into one with
//! [`key`], so types and their names are interchangeable.
//!
//! ## Listeners ([`Listener`], [`ListenerRef`])
//!
//! A [`Listener`] consumes a borrowed [`Message`]. Closures are listeners.
//! [`ListenerRef`] is the shared handle the receiver stores; two handles are
//! the same listener when they point at the same allocation.
//!
//! # Error Types
//!
//! - [`DispatchError`] - Failures surfaced by dispatch
//! - [`ConstructError`] - Field mapping does not fit a message type
//! - [`OverloadError`] - Error callback arrived with an unknown shape
//! - [`RegistryError`] - Conflicting type registry entries

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod key;
mod listener;
mod message;
mod value;

// Re-exports
pub use error::{BoxError, ConstructError, DispatchError, OverloadError, RegistryError};
pub use key::{Keyed, MessageKey, key};
pub use listener::{IntoOutcome, Listener, ListenerRef};
pub use message::{Message, MessageDef, MessageType};
pub use value::{FieldMap, FromValue, SharedError, SharedObject, Value, ValueKind};
