//! Implementation of the `#[derive(Merge)]` macro.
//!
//! For `struct Name { a: A, b: B }` this generates:
//!
//! ```text
//! struct NamePatch { a: Option<A>, b: Option<B> }
//! impl Default for NamePatch     // every field None
//! impl NamePatch { fn a(self, A) -> Self; fn b(self, B) -> Self }
//! impl Merge for Name { type Patch = NamePatch; .. }
//! ```

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

pub fn merge_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let vis = &input.vis;
    let patch_name = format_ident!("{}Patch", struct_name);
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Merge can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Merge can only be derived for structs",
            ))
        }
    };

    let mut patch_fields = Vec::new();
    let mut defaults = Vec::new();
    let mut setters = Vec::new();
    let mut merges = Vec::new();

    for field in fields.iter() {
        let name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;
        let field_vis = &field.vis;
        let ty = &field.ty;

        patch_fields.push(quote! {
            #field_vis #name: ::core::option::Option<#ty>
        });
        defaults.push(quote! {
            #name: ::core::option::Option::None
        });
        let setter_doc = format!("Sets `{name}` in this patch.");
        setters.push(quote! {
            #[doc = #setter_doc]
            #[must_use]
            #vis fn #name(mut self, value: #ty) -> Self {
                self.#name = ::core::option::Option::Some(value);
                self
            }
        });
        merges.push(quote! {
            if let ::core::option::Option::Some(value) = patch.#name {
                self.#name = value;
            }
        });
    }

    let patch_doc = format!("Partial update of [`{struct_name}`]; absent fields are left as they are.");

    let expanded = quote! {
        #[doc = #patch_doc]
        #vis struct #patch_name #impl_generics #where_clause {
            #(#patch_fields,)*
        }

        impl #impl_generics ::core::default::Default for #patch_name #ty_generics #where_clause {
            fn default() -> Self {
                #patch_name {
                    #(#defaults,)*
                }
            }
        }

        impl #impl_generics #patch_name #ty_generics #where_clause {
            #(#setters)*
        }

        impl #impl_generics ::repodeck_table::Merge for #struct_name #ty_generics #where_clause {
            type Patch = #patch_name #ty_generics;

            fn merge(&mut self, patch: Self::Patch) {
                #(#merges)*
            }
        }
    };

    Ok(expanded)
}
