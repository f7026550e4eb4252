//! `#[derive(Message)]` expansion.

use heck::ToLowerCamelCase;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Fields, Ident, LitStr, PathArguments, Token, Type,
    parse::{Parse, ParseStream},
};

#[derive(Default)]
struct MessageArgs {
    name: Option<LitStr>,
    rename: Option<LitStr>,
}

impl Parse for MessageArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = MessageArgs::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => args.name = Some(input.parse()?),
                "rename" => args.rename = Some(input.parse()?),
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

fn message_args(attrs: &[Attribute]) -> syn::Result<MessageArgs> {
    let mut merged = MessageArgs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("message")) {
        let args: MessageArgs = attr.parse_args()?;
        merged.name = args.name.or(merged.name);
        merged.rename = args.rename.or(merged.rename);
    }
    Ok(merged)
}

fn is_option(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    path.qself.is_none()
        && path.path.segments.last().is_some_and(|segment| {
            segment.ident == "Option"
                && matches!(segment.arguments, PathArguments::AngleBracketed(_))
        })
}

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            ident,
            "`Message` can only be derived for structs",
        ));
    };

    let args = message_args(&input.attrs)?;
    if let Some(rename) = &args.rename {
        return Err(syn::Error::new_spanned(
            rename,
            "`rename` applies to fields; use `name` on the struct",
        ));
    }
    let name = args
        .name
        .map(|lit| lit.value())
        .unwrap_or_else(|| ident.to_string());

    let mut wire_names = Vec::new();
    let construct = match &data.fields {
        Fields::Named(named) => {
            let mut inits = Vec::new();
            for field in &named.named {
                let args = message_args(&field.attrs)?;
                if let Some(name) = &args.name {
                    return Err(syn::Error::new_spanned(
                        name,
                        "`name` applies to the struct; use `rename` on fields",
                    ));
                }
                let Some(field_ident) = &field.ident else {
                    continue;
                };
                let wire = args.rename.map(|lit| lit.value()).unwrap_or_else(|| {
                    let raw = field_ident.to_string();
                    raw.trim_start_matches("r#").to_lower_camel_case()
                });
                let getter = if is_option(&field.ty) {
                    quote! { get_as }
                } else {
                    quote! { require }
                };
                inits.push(quote! { #field_ident: message.#getter(#wire)? });
                wire_names.push(wire);
            }
            quote! { Self { #(#inits,)* } }
        }
        Fields::Unit => quote! { Self },
        Fields::Unnamed(fields) => {
            return Err(syn::Error::new_spanned(
                fields,
                "`Message` needs named fields to map them to wire names",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::ibrx::MessageDef for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;
            const FIELDS: &'static [&'static str] = &[#(#wire_names),*];

            fn from_message(
                message: &::ibrx::Message,
            ) -> ::core::result::Result<Self, ::ibrx::ConstructError> {
                message.expect_type(<Self as ::ibrx::MessageDef>::NAME)?;
                ::core::result::Result::Ok(#construct)
            }
        }
    })
}
