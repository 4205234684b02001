// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Struct-level parsing and the combined [`SchemaDef`].

use darling::FromDeriveInput;
use syn::{DeriveInput, Generics, Ident};

use super::{FieldDef, RenameRule, serde_attrs::parse_rename_all};

/// Runtime crate path used when `#[bind(crate = "...")]` is absent.
pub fn default_crate_path() -> syn::Path {
    syn::parse_quote!(::reqbind)
}

/// Struct-level attributes parsed from `#[bind(...)]`.
///
/// ```rust,ignore
/// #[bind(crate = "reqbind_core")]
/// ```
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(bind), supports(struct_named), allow_unknown_fields)]
pub struct SchemaAttrs {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics, carried into every generated impl.
    pub generics: Generics,

    /// Path of the runtime crate in generated code.
    #[darling(rename = "crate", default = "default_crate_path")]
    pub krate: syn::Path
}

/// Complete schema definition used by all generators.
#[derive(Debug)]
pub struct SchemaDef {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics.
    pub generics: Generics,

    /// Runtime crate path.
    pub krate: syn::Path,

    /// Struct-level `#[serde(rename_all = "...")]`.
    pub rename_all: Option<RenameRule>,

    /// Fields in declaration order.
    pub fields: Vec<FieldDef>
}

impl SchemaDef {
    /// Parse a schema from the derive input.
    ///
    /// # Errors
    ///
    /// - applied to an enum, union or tuple struct
    /// - malformed `#[bind(...)]` on the struct or a field
    /// - unknown `#[serde(rename_all)]` rule
    /// - `raw` companion that names the field itself or no field at all
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = SchemaAttrs::from_derive_input(input)?;

        let fields: Vec<FieldDef> = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => named
                    .named
                    .iter()
                    .map(FieldDef::from_field)
                    .collect::<darling::Result<Vec<_>>>()?,
                _ => {
                    return Err(darling::Error::custom("Bind requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(darling::Error::custom("Bind can only be derived for structs")
                    .with_span(&input.ident));
            }
        };

        let rename_all = parse_rename_all(&input.attrs)?;
        check_companions(&fields)?;

        Ok(Self {
            ident: attrs.ident,
            generics: attrs.generics,
            krate: attrs.krate,
            rename_all,
            fields
        })
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// JSON body key of a field, empty when serde never reads it.
    #[must_use]
    pub fn json_key(&self, field: &FieldDef) -> String {
        field.serde.json_key(&field.name_str(), self.rename_all)
    }
}

fn check_companions(fields: &[FieldDef]) -> darling::Result<()> {
    let mut errors = darling::Error::accumulator();
    for field in fields {
        let Some(companion) = &field.shape.raw else {
            continue;
        };
        if *companion == field.name_str() {
            errors.push(
                darling::Error::custom("raw companion must be a different field")
                    .with_span(&field.ident)
            );
        } else if !fields.iter().any(|other| other.name_str() == *companion) {
            errors.push(
                darling::Error::custom(format!("raw companion `{companion}` is not a field"))
                    .with_span(&field.ident)
            );
        }
    }
    errors.finish()
}
