//! Registry key derivation.
//!
//! Listeners are stored per message type under a [`MessageKey`]. The key of
//! anything [`Keyed`] is its declared name when it exposes one, otherwise its
//! `Display` rendering. A message type and its bare name therefore produce
//! the same key.

use std::{borrow::Borrow, fmt, sync::Arc};

/// A stable identifier for a message type in the listener registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey(Arc<str>);

impl MessageKey {
    /// Create a key from a name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for MessageKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for MessageKey {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Something that can be used to look up listeners.
///
/// Implementors with a declared name (message types, messages) return it
/// from [`declared_name`](Keyed::declared_name); everything else is keyed by
/// its `Display` output.
pub trait Keyed: fmt::Display {
    /// The declared name, if this value exposes one.
    fn declared_name(&self) -> Option<&str> {
        None
    }
}

/// Derive the registry key for `obj`.
pub fn key<K: Keyed + ?Sized>(obj: &K) -> MessageKey {
    match obj.declared_name() {
        Some(name) => MessageKey::from(name),
        None => MessageKey::from(obj.to_string()),
    }
}

impl Keyed for str {}

impl Keyed for String {}

impl Keyed for MessageKey {
    fn declared_name(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<K: Keyed + ?Sized> Keyed for &K {
    fn declared_name(&self) -> Option<&str> {
        (**self).declared_name()
    }
}
