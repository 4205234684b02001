// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structural keys: `nested`, `recurse`, `raw`.
//!
//! `nested` alone makes the field a nested schema for validation and JSON
//! key tracking. `recurse` additionally resolves the nested fields from the
//! request and implies `nested`.

use syn::{LitStr, meta::ParseNestedMeta};

/// Nesting and raw companion of one field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShapeConfig {
    /// `nested` flag.
    pub nested: bool,

    /// `recurse` flag.
    pub recurse: bool,

    /// Companion field name.
    pub raw: Option<String>
}

impl ShapeConfig {
    /// Consume a structural key. Returns `false` for keys of other concerns.
    ///
    /// # Errors
    ///
    /// Non-string `raw` value.
    pub fn parse_key(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<bool> {
        if meta.path.is_ident("nested") {
            self.nested = true;
        } else if meta.path.is_ident("recurse") {
            self.recurse = true;
        } else if meta.path.is_ident("raw") {
            let value: LitStr = meta.value()?.parse()?;
            self.raw = Some(value.value());
        } else {
            return Ok(false);
        }
        Ok(true)
    }

    /// Whether the field is a nested schema.
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        self.nested || self.recurse
    }
}
