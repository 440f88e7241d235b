//! Implementation of the `#[derive(Row)]` macro.
//!
//! This macro generates an implementation of the `Row` trait and
//! field name constants for sort keys and filter paths.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_row_attrs;

/// Main implementation of the Row derive macro.
pub fn row_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Row can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Row can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let row_attrs = parse_row_attrs(&field.attrs)?;
        if row_attrs.skip {
            continue;
        }

        let segment = row_attrs.rename.unwrap_or_else(|| {
            let name = field_name.to_string();
            name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
        });
        let const_name = format_ident!("{}", to_screaming_snake_case(&segment));

        field_constants.push(quote! {
            /// Field path for sorting and filtering.
            pub const #const_name: &'static str = #segment;
        });

        if row_attrs.nested {
            field_matches.push(quote! {
                (#segment, ::core::option::Option::Some(rest)) =>
                    ::repodeck_table::Row::field(&self.#field_name, rest),
            });
        } else {
            field_matches.push(quote! {
                (#segment, ::core::option::Option::None) =>
                    ::repodeck_table::AsValue::as_value(&self.#field_name),
            });
        }
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::repodeck_table::Row for #struct_name #ty_generics #where_clause {
            fn field(&self, path: &str) -> ::repodeck_table::Value<'_> {
                #[allow(unused_variables)]
                let (head, rest) = ::repodeck_table::split_path(path);
                match (head, rest) {
                    #(#field_matches)*
                    _ => ::repodeck_table::Value::None,
                }
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphabetic();
        }
    }

    result
}
