//! Procedural macros for ibrx.
//!
//! - `#[derive(Message)]` - implements `MessageDef` for a struct with named fields

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod message;

/// Derive macro for implementing the `MessageDef` trait.
///
/// The declared name defaults to the struct name and each wire field name
/// defaults to the Rust field name in lowerCamelCase. `Option<T>` fields may
/// be absent from the message; all other fields are required.
///
/// # Attributes
///
/// - `#[message(name = "TickPrice")]` on the struct overrides the declared name
/// - `#[message(rename = "WAP")]` on a field overrides its wire name
///
/// # Example
///
/// ```rust,ignore
/// #[derive(ibrx::Message)]
/// struct TickPrice {
///     ticker_id: i64,
///     field: i64,
///     price: f64,
///     can_auto_execute: Option<bool>,
/// }
/// ```
#[proc_macro_derive(Message, attributes(message))]
pub fn derive_message(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    message::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
