//! Overload resolution for the error callback.
//!
//! The wrapper reports errors in three argument shapes, which a name and
//! argument table cannot tell apart:
//!
//! | Shape | Arguments                          | Fields set                    |
//! |-------|------------------------------------|-------------------------------|
//! | coded | `(int id, int code, str message)`  | `id`, `errorCode`, `errorMsg` |
//! | text  | `(str message)`                    | `errorMsg`                    |
//! | value | `(any other single value)`         | `errorMsg`                    |
//!
//! Resolution inspects the argument count and kinds up front and picks the
//! most specific shape. All shapes dispatch as [`ERROR_CALLBACK`], so error
//! listeners see one message type whichever shape triggered it.

use crate::catalogue::ERROR_FIELDS;
use ibrx_core::{ConstructError, FieldMap, Message, MessageDef, OverloadError, Value};

const ID: &str = ERROR_FIELDS[0];
const ERROR_CODE: &str = ERROR_FIELDS[1];
const ERROR_MSG: &str = ERROR_FIELDS[2];

/// Callback name shared by every error shape.
pub const ERROR_CALLBACK: &str = "error";

/// A resolved error notification.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorNotification {
    /// An id, an error code and a message.
    Coded {
        /// Request or order id the error relates to.
        id: i64,
        /// Error code.
        error_code: i64,
        /// Human readable message.
        message: String,
    },
    /// A message on its own.
    Text(String),
    /// Any other single value (typically an error raised by the source).
    Value(Value),
}

impl ErrorNotification {
    /// Resolve positional arguments to one of the error shapes.
    pub fn resolve(args: Vec<Value>) -> Result<Self, OverloadError> {
        let no_match = |args: &[Value]| OverloadError::NoMatch {
            arity: args.len(),
            kinds: args
                .iter()
                .map(|v| v.kind().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        };

        match <[Value; 3]>::try_from(args) {
            Ok([Value::Int(id), Value::Int(error_code), Value::Str(message)]) => {
                Ok(Self::Coded {
                    id,
                    error_code,
                    message,
                })
            }
            Ok(args) => Err(no_match(&args[..])),
            Err(args) => match <[Value; 1]>::try_from(args) {
                Ok([Value::Str(message)]) => Ok(Self::Text(message)),
                Ok([value]) => Ok(Self::Value(value)),
                Err(args) => Err(no_match(&args[..])),
            },
        }
    }

    /// The canonical `error` field mapping for this notification.
    pub fn into_fields(self) -> FieldMap {
        let mut fields = FieldMap::with_capacity(ERROR_FIELDS.len());
        match self {
            Self::Coded {
                id,
                error_code,
                message,
            } => {
                fields.insert(ID.to_owned(), Value::Int(id));
                fields.insert(ERROR_CODE.to_owned(), Value::Int(error_code));
                fields.insert(ERROR_MSG.to_owned(), Value::Str(message));
            }
            Self::Text(message) => {
                fields.insert(ERROR_MSG.to_owned(), Value::Str(message));
            }
            Self::Value(value) => {
                fields.insert(ERROR_MSG.to_owned(), value);
            }
        }
        fields
    }
}

/// Typed view of the canonical `error` message.
///
/// `id` and `error_code` are only present for coded errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorMessage {
    /// Request or order id the error relates to.
    pub id: Option<i64>,
    /// Error code.
    pub error_code: Option<i64>,
    /// The message, or the raw error value.
    pub error_msg: Option<Value>,
}

impl MessageDef for ErrorMessage {
    const NAME: &'static str = "Error";
    const FIELDS: &'static [&'static str] = &ERROR_FIELDS;

    fn from_message(message: &Message) -> Result<Self, ConstructError> {
        message.expect_type(Self::NAME)?;
        Ok(Self {
            id: message.get_as(ID)?,
            error_code: message.get_as(ERROR_CODE)?,
            error_msg: message.get_as(ERROR_MSG)?,
        })
    }
}
