// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Request sources and default literal of a field.
//!
//! | Key | Source |
//! |-----|--------|
//! | `query = "k"` | query string |
//! | `header = "A, B"` | header, first alias |
//! | `url = "k"` | router path parameter |
//! | `default = "lit"` | literal fallback |
//!
//! Values are copied verbatim into the descriptor; aliasing and empty-key
//! handling happen at run time.

use syn::{LitStr, meta::ParseNestedMeta};

/// Source keys of one field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Query-string key.
    pub query: Option<String>,

    /// Header names.
    pub header: Option<String>,

    /// Path parameter key.
    pub url: Option<String>,

    /// Default literal.
    pub default: Option<String>
}

impl SourceConfig {
    /// Consume a source key. Returns `false` for keys of other concerns.
    ///
    /// # Errors
    ///
    /// Non-string values.
    pub fn parse_key(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<bool> {
        let slot = if meta.path.is_ident("query") {
            &mut self.query
        } else if meta.path.is_ident("header") {
            &mut self.header
        } else if meta.path.is_ident("url") {
            &mut self.url
        } else if meta.path.is_ident("default") {
            &mut self.default
        } else {
            return Ok(false);
        };
        let value: LitStr = meta.value()?.parse()?;
        *slot = Some(value.value());
        Ok(true)
    }

    /// Any source key or default present.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.query.is_some() || self.header.is_some() || self.url.is_some() || self.default.is_some()
    }
}
