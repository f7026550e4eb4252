//! Dispatch surface: one entry point per known callback.
//!
//! The surface is built once from a callback argument table. Each
//! [`EntryPoint`] pairs positional values with the callback's declared
//! argument names and forwards the resulting mapping to
//! [`Receiver::dispatch`]. Receivers share a surface through an `Arc`, so
//! adding a callback to the table is all it takes to route it.
//!
//! Binding is best effort: values beyond the declared names are dropped,
//! and names without a value are left out of the mapping.

use crate::catalogue;
use crate::receiver::Receiver;
use ibrx_core::{DispatchError, FieldMap, Value};
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock},
};
use tracing::trace;

static DEFAULT_SURFACE: LazyLock<Arc<DispatchSurface>> = LazyLock::new(|| {
    let table = catalogue::wrapper_methods().map(|(name, args)| (name, args.iter().copied()));
    Arc::new(DispatchSurface::build(table))
});

/// The process-wide surface built from the default callback table.
pub fn default_surface() -> Arc<DispatchSurface> {
    Arc::clone(&DEFAULT_SURFACE)
}

/// The entry point for one callback name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    name: String,
    args: Vec<String>,
}

impl EntryPoint {
    /// Create an entry point for `name` with the given argument names.
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Callback name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared argument names, in positional order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Pair positional values with the declared argument names.
    pub fn bind(&self, values: Vec<Value>) -> FieldMap {
        let supplied = values.len();
        if supplied > self.args.len() {
            trace!(
                callback = %self.name,
                declared = self.args.len(),
                supplied,
                "dropping extra positional arguments"
            );
        }
        self.args.iter().cloned().zip(values).collect()
    }

    /// Bind `values` and dispatch them through `receiver`.
    pub fn call(&self, receiver: &Receiver, values: Vec<Value>) -> Result<(), DispatchError> {
        receiver.dispatch(&self.name, self.bind(values))
    }
}

/// All entry points, by callback name.
#[derive(Debug, Clone, Default)]
pub struct DispatchSurface {
    entries: HashMap<String, EntryPoint>,
}

impl DispatchSurface {
    /// Build a surface from `(name, argument names)` pairs.
    ///
    /// A later pair for the same name replaces an earlier one.
    pub fn build<'a, I, A>(table: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, A)>,
        A: IntoIterator<Item = &'a str>,
    {
        let entries = table
            .into_iter()
            .map(|(name, args)| (name.to_owned(), EntryPoint::new(name, args)))
            .collect();
        Self { entries }
    }

    /// The entry point for a callback name.
    pub fn entry(&self, name: &str) -> Option<&EntryPoint> {
        self.entries.get(name)
    }

    /// Iterate the known callback names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entry points.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the surface has no entry points.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
