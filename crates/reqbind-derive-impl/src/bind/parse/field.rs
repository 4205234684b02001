// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! One `#[bind(...)]` attribute (or several) per field, split by concern:
//!
//! ```text
//! field.rs (coordinator)
//! ├── source.rs  - query / header / url / default
//! └── shape.rs   - nested / recurse / raw
//! ```
//!
//! `rules` is kept on the field itself.

mod shape;
mod source;

pub use shape::ShapeConfig;
pub use source::SourceConfig;
use syn::{Field, Ident, LitStr, Type, ext::IdentExt};

use super::SerdeField;
use crate::utils::types::option_inner;

/// Structural kind of a field, with the schema type for nested kinds.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Leaf value.
    Scalar,
    /// Inline nested schema.
    Nested(Type),
    /// `Option<T>` nested schema; holds `T`.
    OptionalNested(Type)
}

/// Field definition with all parsed attributes.
///
/// ```rust,ignore
/// #[bind(query = "page", default = "1", rules = "min=1")]
/// pub page: u32,
///
/// #[bind(recurse)]
/// pub filter: Option<Filter>,
/// ```
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident: Ident,

    /// Field type.
    pub ty: Type,

    /// Source keys and default literal.
    pub source: SourceConfig,

    /// Nesting and raw companion.
    pub shape: ShapeConfig,

    /// Validation rule string.
    pub rules: Option<String>,

    /// Serde settings that decide the JSON key.
    pub serde: SerdeField,

    kind: FieldKind
}

impl FieldDef {
    /// Parse field definition from syn's `Field`.
    ///
    /// # Errors
    ///
    /// - unnamed field
    /// - unknown or malformed `#[bind(...)]` key
    /// - `nested`/`recurse` on a non-path type
    /// - source keys or a default on a nested field
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| darling::Error::custom("Bind fields must be named").with_span(field))?;
        let ty = field.ty.clone();
        let serde = SerdeField::from_attrs(&field.attrs)?;

        let mut source = SourceConfig::default();
        let mut shape = ShapeConfig::default();
        let mut rules = None;

        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("bind")) {
            attr.parse_nested_meta(|meta| {
                if source.parse_key(&meta)? || shape.parse_key(&meta)? {
                    return Ok(());
                }
                if meta.path.is_ident("rules") {
                    let value: LitStr = meta.value()?.parse()?;
                    rules = Some(value.value());
                    return Ok(());
                }
                Err(meta.error("unknown bind key; expected one of query, header, url, default, nested, recurse, raw, rules"))
            })?;
        }

        let kind = if shape.is_nested() {
            nested_kind(&ty).ok_or_else(|| {
                darling::Error::custom("nested fields must have a named schema type")
                    .with_span(&field.ty)
            })?
        } else {
            FieldKind::Scalar
        };
        if shape.is_nested() && source.is_bound() {
            return Err(darling::Error::custom(
                "nested fields take no query, header, url or default"
            )
            .with_span(&ident));
        }

        Ok(Self {
            ident,
            ty,
            source,
            shape,
            rules,
            serde,
            kind
        })
    }

    /// Field name as used in paths; raw identifiers lose their `r#`.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Structural kind.
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Whether values are coerced into this field.
    #[must_use]
    pub fn is_assignable(&self) -> bool {
        matches!(self.kind, FieldKind::Scalar) && self.source.is_bound()
    }

    /// Whether the field carries validation rules.
    #[must_use]
    pub fn has_rules(&self) -> bool {
        self.rules.as_deref().is_some_and(|rules| !rules.is_empty())
    }
}

fn nested_kind(ty: &Type) -> Option<FieldKind> {
    let schema = |ty: &Type| matches!(ty, Type::Path(_)).then(|| ty.clone());
    match option_inner(ty) {
        Some(inner) => schema(inner).map(FieldKind::OptionalNested),
        None => schema(ty).map(FieldKind::Nested)
    }
}
