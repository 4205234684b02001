// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `impl Schema` generation.
//!
//! Each field becomes one `const` builder chain:
//!
//! ```rust,ignore
//! FieldDescriptor::new("page", "page")
//!     .nested(<Page as Schema>::DESCRIPTORS)
//!     .recurse()
//! ```
//!
//! Nested tables are referenced through the child's associated constant, so
//! a schema that contains itself fails to compile instead of looping.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{FieldDef, FieldKind, SchemaDef};

/// Generate the `Schema` implementation.
pub fn generate(schema: &SchemaDef) -> TokenStream {
    let ident = &schema.ident;
    let krate = &schema.krate;
    let (impl_generics, ty_generics, where_clause) = schema.generics.split_for_impl();
    let entries = schema.fields().iter().map(|field| entry(schema, field));

    quote! {
        impl #impl_generics #krate::Schema for #ident #ty_generics #where_clause {
            const DESCRIPTORS: &'static [#krate::FieldDescriptor] = &[
                #(#entries),*
            ];
        }
    }
}

fn entry(schema: &SchemaDef, field: &FieldDef) -> TokenStream {
    let krate = &schema.krate;
    let name = field.name_str();
    let json = schema.json_key(field);
    let mut tokens = quote! { #krate::FieldDescriptor::new(#name, #json) };
    let aliases = field.serde.json_aliases();
    if !aliases.is_empty() {
        tokens.extend(quote! { .json_aliases(&[#(#aliases),*]) });
    }

    match field.kind() {
        FieldKind::Scalar => {}
        FieldKind::Nested(ty) => {
            tokens.extend(quote! { .nested(<#ty as #krate::Schema>::DESCRIPTORS) });
        }
        FieldKind::OptionalNested(ty) => {
            tokens.extend(quote! { .optional_nested(<#ty as #krate::Schema>::DESCRIPTORS) });
        }
    }

    let source = &field.source;
    if let Some(key) = &source.query {
        tokens.extend(quote! { .query(#key) });
    }
    if let Some(names) = &source.header {
        tokens.extend(quote! { .header(#names) });
    }
    if let Some(key) = &source.url {
        tokens.extend(quote! { .url(#key) });
    }
    if let Some(literal) = &source.default {
        tokens.extend(quote! { .default_value(#literal) });
    }
    if field.shape.recurse {
        tokens.extend(quote! { .recurse() });
    }
    if let Some(companion) = &field.shape.raw {
        tokens.extend(quote! { .raw(#companion) });
    }
    if let Some(rules) = &field.rules {
        tokens.extend(quote! { .rules(#rules) });
    }
    tokens
}

#[cfg(test)]
mod tests {
    use syn::DeriveInput;

    use super::*;

    fn expand(input: DeriveInput) -> String {
        generate(&SchemaDef::from_derive_input(&input).unwrap()).to_string()
    }

    #[test]
    fn scalar_entry_chain() {
        let output = expand(syn::parse_quote! {
            pub struct Page {
                #[bind(query = "size", header = "X-Size, X-Page-Size", default = "20", rules = "max=100")]
                pub size: u32,
            }
        });
        assert!(output.contains("FieldDescriptor :: new (\"size\" , \"size\")"));
        assert!(output.contains(". query (\"size\")"));
        assert!(output.contains(". header (\"X-Size, X-Page-Size\")"));
        assert!(output.contains(". default_value (\"20\")"));
        assert!(output.contains(". rules (\"max=100\")"));
        assert!(!output.contains(". recurse"));
    }

    #[test]
    fn nested_entries_reference_child_tables() {
        let output = expand(syn::parse_quote! {
            pub struct Search {
                #[bind(recurse)]
                pub page: Page,
                #[bind(nested)]
                pub next: Option<Page>,
            }
        });
        assert!(output.contains(". nested (< Page as :: reqbind :: Schema > :: DESCRIPTORS) . recurse ()"));
        assert!(output.contains(". optional_nested (< Page as :: reqbind :: Schema > :: DESCRIPTORS)"));
    }

    #[test]
    fn json_key_follows_serde() {
        let output = expand(syn::parse_quote! {
            #[serde(rename_all = "camelCase")]
            pub struct Query {
                pub page_size: u32,
                #[serde(rename = "q")]
                pub search_term: String,
                #[serde(skip)]
                #[bind(raw = "page_size")]
                pub cached: Vec<u8>,
            }
        });
        assert!(output.contains("new (\"page_size\" , \"pageSize\")"));
        assert!(output.contains("new (\"search_term\" , \"q\")"));
        assert!(output.contains("new (\"cached\" , \"\") . raw (\"page_size\")"));
    }

    #[test]
    fn serde_aliases_are_emitted() {
        let output = expand(syn::parse_quote! {
            pub struct Toggle {
                #[serde(alias = "enable", alias = "on")]
                #[bind(default = "true")]
                pub enable_feature: bool,
            }
        });
        assert!(output.contains(
            "new (\"enable_feature\" , \"enable_feature\") . json_aliases (& [\"enable\" , \"on\"]) . default_value (\"true\")"
        ));
    }

    #[test]
    fn custom_crate_path() {
        let output = expand(syn::parse_quote! {
            #[bind(crate = "reqbind_core")]
            pub struct Page {
                pub size: u32,
            }
        });
        assert!(output.contains("impl reqbind_core :: Schema for Page"));
    }

    #[test]
    fn raw_identifier_name() {
        let output = expand(syn::parse_quote! {
            pub struct Item {
                #[bind(query = "type")]
                pub r#type: String,
            }
        });
        assert!(output.contains("new (\"type\" , \"type\")"));
    }

    #[test]
    fn generics_are_carried() {
        let output = expand(syn::parse_quote! {
            pub struct Wrapper<T: Default> {
                #[bind(recurse)]
                pub inner: T,
            }
        });
        assert!(output.contains("impl < T : Default > :: reqbind :: Schema for Wrapper < T >"));
    }
}
