//! Type registry: callback name to message type.
//!
//! A registry is built once and then only read. Receivers hold it through an
//! `Arc`; those that are not given one share the process-wide
//! [`default_registry`], derived from the [catalogue](crate::catalogue).

use crate::catalogue::{self, ERROR_FIELDS};
use crate::overload::ERROR_CALLBACK;
use ibrx_core::{MessageDef, MessageType, RegistryError};
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock},
};

static DEFAULT_REGISTRY: LazyLock<Arc<TypeRegistry>> =
    LazyLock::new(|| Arc::new(TypeRegistry::catalogue()));

/// The process-wide default registry.
///
/// Built on first use from the default callback table, read-only afterwards.
pub fn default_registry() -> Arc<TypeRegistry> {
    Arc::clone(&DEFAULT_REGISTRY)
}

/// An immutable mapping from callback name to [`MessageType`].
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, MessageType>,
}

impl TypeRegistry {
    /// Start building a registry.
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    /// Derive a registry from a callback argument table.
    ///
    /// Each callback gets a message type named after it with its first letter
    /// uppercased, declaring the callback's arguments as fields. The `error`
    /// type is always added.
    pub fn from_table<'a, I, A>(table: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (&'a str, A)>,
        A: IntoIterator<Item = &'a str>,
    {
        let mut builder = TypeRegistryBuilder::new();
        for (name, mtype) in derive_types(table) {
            builder.insert(name, mtype)?;
        }
        Ok(builder.build())
    }

    fn catalogue() -> Self {
        let table = catalogue::wrapper_methods().map(|(name, args)| (name, args.iter().copied()));
        let types = derive_types(table)
            .map(|(name, mtype)| (name.to_owned(), mtype))
            .collect();
        Self { types }
    }

    /// The message type for a callback name.
    pub fn get(&self, callback: &str) -> Option<&MessageType> {
        self.types.get(callback)
    }

    /// Whether the callback name is mapped.
    pub fn contains(&self, callback: &str) -> bool {
        self.types.contains_key(callback)
    }

    /// Iterate `(callback name, message type)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MessageType)> {
        self.types.iter().map(|(name, mtype)| (name.as_str(), mtype))
    }

    /// Iterate all message types.
    pub fn types(&self) -> impl Iterator<Item = &MessageType> {
        self.types.values()
    }

    /// Number of mapped callbacks.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// The `error` type followed by one type per table entry.
fn derive_types<'a, I, A>(table: I) -> impl Iterator<Item = (&'a str, MessageType)>
where
    I: IntoIterator<Item = (&'a str, A)>,
    A: IntoIterator<Item = &'a str>,
{
    let error = MessageType::new(catalogue::type_name(ERROR_CALLBACK), ERROR_FIELDS);
    std::iter::once((ERROR_CALLBACK, error)).chain(
        table
            .into_iter()
            .filter(|(name, _)| *name != ERROR_CALLBACK)
            .map(|(name, args)| (name, MessageType::new(catalogue::type_name(name), args))),
    )
}

/// Builder for [`TypeRegistry`].
///
/// A callback name may be mapped once. A declared type name may be shared by
/// several callbacks only if they declare identical fields, so the type name
/// stays a unique key.
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    types: HashMap<String, MessageType>,
}

impl TypeRegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a callback name to a message type.
    pub fn insert(
        &mut self,
        callback: impl Into<String>,
        mtype: MessageType,
    ) -> Result<(), RegistryError> {
        let callback = callback.into();
        if self.types.contains_key(&callback) {
            return Err(RegistryError::DuplicateCallback(callback));
        }
        if self
            .types
            .values()
            .any(|existing| existing.name() == mtype.name() && existing != &mtype)
        {
            return Err(RegistryError::ConflictingType(mtype.name().to_owned()));
        }
        self.types.insert(callback, mtype);
        Ok(())
    }

    /// Map a callback name to a statically-defined message.
    pub fn insert_def<M: MessageDef>(
        &mut self,
        callback: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.insert(callback, MessageType::of::<M>())
    }

    /// Build the registry.
    pub fn build(self) -> TypeRegistry {
        TypeRegistry { types: self.types }
    }
}
