//! Dynamically-typed callback arguments.

use indexmap::IndexMap;
use std::{any::Any, fmt, sync::Arc};

/// A shared error carried as a callback argument.
pub type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// A shared opaque object carried as a callback argument (contracts, orders...).
pub type SharedObject = Arc<dyn Any + Send + Sync + 'static>;

/// Field name to value mapping, in insertion order.
pub type FieldMap = IndexMap<String, Value>;

/// A single positional argument of an inbound callback.
#[derive(Clone)]
pub enum Value {
    /// Integer argument (ids, codes, sizes).
    Int(i64),
    /// Floating point argument (prices, greeks).
    Float(f64),
    /// Boolean argument.
    Bool(bool),
    /// String argument.
    Str(String),
    /// An error raised by the callback source itself.
    Error(SharedError),
    /// Any other structured payload.
    Object(SharedObject),
}

/// The kind of a [`Value`], used for overload resolution and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Int`]
    Int,
    /// [`Value::Float`]
    Float,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Str`]
    Str,
    /// [`Value::Error`]
    Error,
    /// [`Value::Object`]
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Str => "str",
            ValueKind::Error => "error",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Wrap an error value.
    pub fn error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Value::Error(Arc::new(error))
    }

    /// Wrap an arbitrary payload.
    pub fn object<T: Any + Send + Sync>(object: T) -> Self {
        Value::Object(Arc::new(object))
    }

    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Str(_) => ValueKind::Str,
            Value::Error(_) => ValueKind::Error,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Integer content, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric content as `f64`. Integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Boolean content, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// String content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Error content, if this is an error.
    pub fn as_error(&self) -> Option<&SharedError> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Borrow an object payload as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Object(o) => o.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            // Shared payloads compare by identity.
            (Value::Error(a), Value::Error(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Value::Error(e) => f.debug_tuple("Error").field(&e.to_string()).finish(),
            Value::Object(_) => f.write_str("Object(..)"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Str(v) => f.write_str(v),
            Value::Error(e) => write!(f, "{e}"),
            Value::Object(_) => f.write_str("<object>"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<SharedError> for Value {
    fn from(e: SharedError) -> Self {
        Value::Error(e)
    }
}

/// Conversion from a stored [`Value`] into a concrete Rust type.
///
/// Used by typed message views; `None` means the value has the wrong kind.
pub trait FromValue: Sized {
    /// The kind this conversion expects, for diagnostics.
    const KIND: ValueKind;

    /// Convert, or `None` if the value has another kind.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_int()
    }
}

impl FromValue for i32 {
    const KIND: ValueKind = ValueKind::Int;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_int().and_then(|v| i32::try_from(v).ok())
    }
}

impl FromValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_float()
    }
}

impl FromValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for String {
    const KIND: ValueKind = ValueKind::Str;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromValue for SharedError {
    const KIND: ValueKind = ValueKind::Error;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_error().cloned()
    }
}

impl FromValue for SharedObject {
    const KIND: ValueKind = ValueKind::Object;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(o) => Some(Arc::clone(o)),
            _ => None,
        }
    }
}

impl FromValue for Value {
    // Accepts every kind; the constant only feeds diagnostics.
    const KIND: ValueKind = ValueKind::Object;

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}
