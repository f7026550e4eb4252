//! # ibrx-std
//!
//! Standard implementations for the ibrx inbound callback dispatcher.
//!
//! This crate provides:
//! - **Catalogue**: the default wrapper callback table ([`catalogue`])
//! - **Type registry**: callback name to message type ([`TypeRegistry`])
//! - **Dispatch surface**: one entry point per callback ([`DispatchSurface`])
//! - **Error overloads**: shape-based resolution ([`ErrorNotification`])
//! - **Receiver**: listener registry and fan-out ([`Receiver`])
//! - **Standard listeners**: typed, filter, channel
//! - **Testing utilities**: recording and failing listeners

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use ibrx_core;

// Modules
pub mod catalogue;
pub mod listeners;
pub mod overload;
pub mod receiver;
pub mod registry;
pub mod surface;
pub mod testing;

pub use overload::{ERROR_CALLBACK, ErrorMessage, ErrorNotification};
pub use receiver::{Receiver, ReceiverBuilder};
pub use registry::{TypeRegistry, TypeRegistryBuilder, default_registry};
pub use surface::{DispatchSurface, EntryPoint, default_surface};
