//! Message types and message instances.

use crate::{
    error::ConstructError,
    key::Keyed,
    value::{FieldMap, FromValue, Value},
};
use std::{fmt, sync::Arc};

/// Runtime descriptor of a message: a declared name and its field list.
///
/// Construction accepts any subset of the declared fields. Absent fields are
/// left unset; fields the type does not declare are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageType {
    name: Arc<str>,
    fields: Arc<[String]>,
}

impl MessageType {
    /// Create a message type with the given declared name and fields.
    pub fn new<I, S>(name: impl Into<Arc<str>>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// The runtime descriptor of a statically-defined message.
    pub fn of<M: MessageDef>() -> Self {
        Self::new(M::NAME, M::FIELDS.iter().copied())
    }

    /// The declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared fields, in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Whether `field` is declared by this type.
    pub fn declares(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Build a message instance from a field mapping.
    ///
    /// The resulting message stores its fields in declaration order.
    pub fn construct(&self, mut mapping: FieldMap) -> Result<Message, ConstructError> {
        if let Some(field) = mapping.keys().find(|field| !self.declares(field)) {
            return Err(ConstructError::UnexpectedField {
                message: self.name.to_string(),
                field: field.clone(),
            });
        }

        let mut fields = FieldMap::with_capacity(mapping.len());
        for declared in self.fields.iter() {
            if let Some(value) = mapping.shift_remove(declared.as_str()) {
                fields.insert(declared.clone(), value);
            }
        }

        Ok(Message {
            name: Arc::clone(&self.name),
            fields,
        })
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.fields.join(", "))
    }
}

impl Keyed for MessageType {
    fn declared_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// A constructed message, handed to listeners by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    name: Arc<str>,
    fields: FieldMap,
}

impl Message {
    /// Declared name of the message's type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All set fields, in declaration order.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Consume the message, returning its fields.
    pub fn into_fields(self) -> FieldMap {
        self.fields
    }

    /// A raw field value, or `None` if the field was not supplied.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether the field was supplied.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Whether this message is of the type declared as `name`.
    pub fn is(&self, name: &str) -> bool {
        &*self.name == name
    }

    /// Read an optional field as `T`.
    ///
    /// Absent fields are `Ok(None)`; present fields of the wrong kind fail.
    pub fn get_as<T: FromValue>(&self, field: &str) -> Result<Option<T>, ConstructError> {
        let Some(value) = self.fields.get(field) else {
            return Ok(None);
        };
        T::from_value(value)
            .map(Some)
            .ok_or_else(|| ConstructError::FieldType {
                message: self.name.to_string(),
                field: field.to_owned(),
                expected: T::KIND,
                found: value.kind(),
            })
    }

    /// Read a required field as `T`.
    pub fn require<T: FromValue>(&self, field: &str) -> Result<T, ConstructError> {
        self.get_as(field)?
            .ok_or_else(|| ConstructError::MissingField {
                message: self.name.to_string(),
                field: field.to_owned(),
            })
    }

    /// Fail unless this message has the declared name `expected`.
    pub fn expect_type(&self, expected: &str) -> Result<(), ConstructError> {
        if self.is(expected) {
            Ok(())
        } else {
            Err(ConstructError::WrongType {
                expected: expected.to_owned(),
                found: self.name.to_string(),
            })
        }
    }

    /// Convert into a statically-typed message.
    pub fn to<M: MessageDef>(&self) -> Result<M, ConstructError> {
        M::from_message(self)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (i, (field, value)) in self.fields.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{field}={value}")?;
        }
        f.write_str(">")
    }
}

impl Keyed for Message {
    fn declared_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// A statically-typed message definition.
///
/// Usually derived with `#[derive(Message)]`; implementing it by hand is a
/// matter of naming the type, listing its wire fields and reading them back
/// out of a [`Message`].
///
/// # Example
///
/// ```rust
/// use ibrx_core::{ConstructError, Message, MessageDef};
///
/// struct CurrentTime {
///     time: i64,
/// }
///
/// impl MessageDef for CurrentTime {
///     const NAME: &'static str = "CurrentTime";
///     const FIELDS: &'static [&'static str] = &["time"];
///
///     fn from_message(message: &Message) -> Result<Self, ConstructError> {
///         message.expect_type(Self::NAME)?;
///         Ok(Self { time: message.require("time")? })
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a message definition",
    label = "missing `MessageDef` implementation",
    note = "Derive it with `#[derive(ibrx::Message)]` or implement `from_message` by hand."
)]
pub trait MessageDef: Sized + Send + Sync + 'static {
    /// Declared type name, which is also the registry key.
    const NAME: &'static str;

    /// Wire field names, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Read the typed message out of a constructed instance.
    fn from_message(message: &Message) -> Result<Self, ConstructError>;
}
