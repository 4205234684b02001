// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `impl Fields` and `impl Inspect` generation.
//!
//! Every method is a `match` on the descriptor index with one arm per field
//! that takes part in the operation:
//!
//! | Method | Arms for |
//! |--------|----------|
//! | `assign` | scalar fields with a source key or default |
//! | `nested_mut` / `nested` | `nested` and `recurse` fields |
//! | `redecode` | fields with a `raw` companion |
//! | `inspect` | fields with `rules` |
//!
//! A field without a `Coerce` impl but with a source key, or a `raw` target
//! that is not `DeserializeOwned + ZeroValue`, fails type checking in the
//! generated arm. `Option` raw targets only need `DeserializeOwned`.

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use super::parse::{FieldDef, FieldKind, SchemaDef};
use crate::utils::types::option_inner;

/// Generate the `Fields` and `Inspect` implementations.
pub fn generate(schema: &SchemaDef) -> TokenStream {
    let ident = &schema.ident;
    let krate = &schema.krate;
    let (impl_generics, ty_generics, where_clause) = schema.generics.split_for_impl();

    let assign = assign_arms(schema);
    let nested_mut = nested_mut_arms(schema);
    let nested = nested_arms(schema);
    let redecode = redecode_method(schema);
    let inspect = inspect_arms(schema);

    quote! {
        impl #impl_generics #krate::Fields for #ident #ty_generics #where_clause {
            fn descriptors(&self) -> &'static [#krate::FieldDescriptor] {
                <Self as #krate::Schema>::DESCRIPTORS
            }

            fn assign(
                &mut self,
                index: usize,
                raw: &str
            ) -> ::core::result::Result<(), #krate::CoerceError> {
                match index {
                    #(#assign,)*
                    _ => ::core::result::Result::Err(#krate::CoerceError::Unsupported)
                }
            }

            fn nested_mut(
                &mut self,
                index: usize
            ) -> ::core::option::Option<&mut dyn #krate::Fields> {
                match index {
                    #(#nested_mut,)*
                    _ => ::core::option::Option::None
                }
            }

            fn nested(&self, index: usize) -> ::core::option::Option<&dyn #krate::Fields> {
                match index {
                    #(#nested,)*
                    _ => ::core::option::Option::None
                }
            }

            #redecode

            fn inspect(
                &self,
                index: usize
            ) -> ::core::option::Option<#krate::Inspected<'_>> {
                match index {
                    #(#inspect,)*
                    _ => ::core::option::Option::None
                }
            }
        }

        impl #impl_generics #krate::Inspect for #ident #ty_generics #where_clause {
            fn subject(&self) -> #krate::Subject<'_> {
                #krate::Subject::Opaque
            }
        }
    }
}

fn indexed<'a>(schema: &'a SchemaDef) -> impl Iterator<Item = (Literal, &'a FieldDef)> {
    schema
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| (Literal::usize_unsuffixed(index), field))
}

fn assign_arms(schema: &SchemaDef) -> Vec<TokenStream> {
    let krate = &schema.krate;
    indexed(schema)
        .filter(|(_, field)| field.is_assignable())
        .map(|(index, field)| {
            let ident = &field.ident;
            quote! { #index => #krate::Coerce::coerce(&mut self.#ident, raw) }
        })
        .collect()
}

fn nested_mut_arms(schema: &SchemaDef) -> Vec<TokenStream> {
    let krate = &schema.krate;
    indexed(schema)
        .filter_map(|(index, field)| {
            let ident = &field.ident;
            match field.kind() {
                FieldKind::Scalar => None,
                FieldKind::Nested(_) => Some(quote! {
                    #index => ::core::option::Option::Some(
                        &mut self.#ident as &mut dyn #krate::Fields
                    )
                }),
                FieldKind::OptionalNested(ty) => Some(quote! {
                    #index => ::core::option::Option::Some(
                        self.#ident.get_or_insert_with(<#ty as ::core::default::Default>::default)
                            as &mut dyn #krate::Fields
                    )
                })
            }
        })
        .collect()
}

fn nested_arms(schema: &SchemaDef) -> Vec<TokenStream> {
    let krate = &schema.krate;
    indexed(schema)
        .filter_map(|(index, field)| {
            let ident = &field.ident;
            match field.kind() {
                FieldKind::Scalar => None,
                FieldKind::Nested(_) => Some(quote! {
                    #index => ::core::option::Option::Some(&self.#ident as &dyn #krate::Fields)
                }),
                FieldKind::OptionalNested(_) => Some(quote! {
                    #index => self.#ident.as_ref().map(|value| value as &dyn #krate::Fields)
                })
            }
        })
        .collect()
}

/// Only emitted when some field has a companion; the trait default covers
/// the rest.
fn redecode_method(schema: &SchemaDef) -> TokenStream {
    let krate = &schema.krate;
    let arms: Vec<TokenStream> = indexed(schema)
        .filter_map(|(index, field)| {
            let companion = field.shape.raw.as_ref()?;
            let companion = schema
                .fields()
                .iter()
                .find(|other| other.name_str() == *companion)?;
            let target = &field.ident;
            let companion = &companion.ident;
            let redecode = if option_inner(&field.ty).is_some() {
                quote! { redecode_optional }
            } else {
                quote! { redecode }
            };
            Some(quote! {
                #index => #krate::raw::#redecode(
                    &mut self.#target,
                    #krate::RawText::raw_text(&self.#companion)
                )
            })
        })
        .collect();

    if arms.is_empty() {
        return TokenStream::new();
    }
    quote! {
        fn redecode(
            &mut self,
            index: usize
        ) -> ::core::result::Result<bool, #krate::raw::DocumentError> {
            match index {
                #(#arms,)*
                _ => ::core::result::Result::Ok(false)
            }
        }
    }
}

fn inspect_arms(schema: &SchemaDef) -> Vec<TokenStream> {
    let krate = &schema.krate;
    indexed(schema)
        .filter(|(_, field)| field.has_rules())
        .map(|(index, field)| {
            let ident = &field.ident;
            quote! {
                #index => ::core::option::Option::Some(#krate::Inspected::of(&self.#ident))
            }
        })
        .collect()
}
