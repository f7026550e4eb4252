//! Error types for ibrx.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`DispatchError`] - Errors surfaced to whoever delivered the callback
//! - [`ConstructError`] - A field mapping did not fit its message type
//! - [`OverloadError`] - The error callback arrived with an unknown shape
//! - [`RegistryError`] - Conflicting entries while building a type registry
//!
//! An unknown callback name with no message type, or a message type nobody
//! listens to, is *not* an error: dispatch simply does nothing.

use crate::{key::MessageKey, value::ValueKind};
use thiserror::Error;

/// A boxed error type for listener failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while dispatching a callback.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No entry point exists for the invoked callback name.
    #[error("no entry point for callback `{0}`")]
    UnknownCallback(String),

    /// The field mapping did not satisfy the message type.
    #[error("failed to construct message for callback `{callback}`")]
    Construct {
        /// The callback being dispatched.
        callback: String,
        /// The underlying construction failure.
        #[source]
        source: ConstructError,
    },

    /// A listener failed. Listeners after it were not invoked.
    #[error("listener failed while handling `{key}`")]
    Listener {
        /// The registry key of the message being delivered.
        key: MessageKey,
        /// The listener's error.
        #[source]
        source: BoxError,
    },

    /// The error callback matched none of its overloads.
    #[error(transparent)]
    Overload(#[from] OverloadError),
}

/// Errors raised when building or reading a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructError {
    /// The mapping carries a field the message type does not declare.
    #[error("`{message}` has no field named `{field}`")]
    UnexpectedField {
        /// Declared name of the message type.
        message: String,
        /// The offending field.
        field: String,
    },

    /// A typed view required a field that was absent.
    #[error("`{message}` is missing required field `{field}`")]
    MissingField {
        /// Declared name of the message type.
        message: String,
        /// The absent field.
        field: String,
    },

    /// A field held a value of the wrong kind for a typed view.
    #[error("field `{field}` of `{message}` expected {expected}, found {found}")]
    FieldType {
        /// Declared name of the message type.
        message: String,
        /// The field being read.
        field: String,
        /// Kind the typed view asked for.
        expected: ValueKind,
        /// Kind actually stored.
        found: ValueKind,
    },

    /// A typed view was requested for a message of another type.
    #[error("expected a `{expected}` message, found `{found}`")]
    WrongType {
        /// Name the typed view expects.
        expected: String,
        /// Name of the message actually received.
        found: String,
    },
}

/// Errors from resolving the overloaded error callback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverloadError {
    /// No overload accepts the given argument shape.
    #[error("no `error` overload accepts {arity} argument(s) of kind ({kinds})")]
    NoMatch {
        /// Number of arguments received.
        arity: usize,
        /// Comma-separated kinds of the arguments received.
        kinds: String,
    },
}

/// Errors that can occur while building a type registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The callback name is already mapped.
    #[error("callback `{0}` is already registered")]
    DuplicateCallback(String),

    /// Two different definitions share one declared type name.
    #[error("type name `{0}` is already declared with different fields")]
    ConflictingType(String),
}
