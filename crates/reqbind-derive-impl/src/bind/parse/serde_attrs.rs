// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! JSON key resolution from `#[serde(...)]`.
//!
//! The body is decoded by the struct's own `Deserialize` impl, so key
//! presence tracking has to agree with serde on every field name:
//!
//! | Attribute | Effect on key |
//! |-----------|---------------|
//! | `#[serde(rename = "k")]` | `k` |
//! | `#[serde(rename(deserialize = "k"))]` | `k` |
//! | `#[serde(alias = "k")]` (repeatable) | extra accepted key |
//! | `#[serde(skip)]`, `#[serde(skip_deserializing)]` | none |
//! | struct `#[serde(rename_all = "...")]` | rule applied to field name |
//!
//! Other serde keys are skipped without interpretation.

use convert_case::{Case, Casing};
use syn::{Attribute, LitStr, Token, meta::ParseNestedMeta, token::Paren};

/// Struct-level `rename_all` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    /// `lowercase`
    Lower,
    /// `UPPERCASE`
    Upper,
    /// `PascalCase`
    Pascal,
    /// `camelCase`
    Camel,
    /// `snake_case`
    Snake,
    /// `SCREAMING_SNAKE_CASE`
    ScreamingSnake,
    /// `kebab-case`
    Kebab,
    /// `SCREAMING-KEBAB-CASE`
    ScreamingKebab
}

impl RenameRule {
    /// Rule for a serde rule name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "lowercase" => Self::Lower,
            "UPPERCASE" => Self::Upper,
            "PascalCase" => Self::Pascal,
            "camelCase" => Self::Camel,
            "snake_case" => Self::Snake,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnake,
            "kebab-case" => Self::Kebab,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebab,
            _ => return None
        })
    }

    /// Apply to a snake_case field name.
    #[must_use]
    pub fn apply(self, field: &str) -> String {
        let snake = field.from_case(Case::Snake);
        match self {
            Self::Lower | Self::Snake => field.to_owned(),
            Self::Upper | Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Pascal => snake.to_case(Case::Pascal),
            Self::Camel => snake.to_case(Case::Camel),
            Self::Kebab => field.replace('_', "-"),
            Self::ScreamingKebab => field.replace('_', "-").to_ascii_uppercase()
        }
    }
}

/// Serde settings of one field relevant to key tracking.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SerdeField {
    /// Deserialize-side rename.
    pub rename: Option<String>,

    /// Extra keys from `#[serde(alias = "...")]`, in declaration order.
    pub aliases: Vec<String>,

    /// Field never read from the body.
    pub skip: bool
}

impl SerdeField {
    /// Collect serde settings from field attributes.
    ///
    /// # Errors
    ///
    /// Returns the syn error for malformed `#[serde(...)]` content.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut field = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if let Some(name) = deserialize_name(&meta)? {
                        field.rename = Some(name);
                    }
                } else if meta.path.is_ident("alias") {
                    let alias: LitStr = meta.value()?.parse()?;
                    field.aliases.push(alias.value());
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_deserializing") {
                    field.skip = true;
                } else {
                    skip_meta(&meta)?;
                }
                Ok(())
            })?;
        }
        Ok(field)
    }

    /// Alias keys; none when skipped.
    #[must_use]
    pub fn json_aliases(&self) -> &[String] {
        if self.skip { &[] } else { &self.aliases }
    }

    /// Body key for a field named `name`; empty when skipped.
    #[must_use]
    pub fn json_key(&self, name: &str, rule: Option<RenameRule>) -> String {
        if self.skip {
            return String::new();
        }
        match (&self.rename, rule) {
            (Some(rename), _) => rename.clone(),
            (None, Some(rule)) => rule.apply(name),
            (None, None) => name.to_owned()
        }
    }
}

/// Parse struct-level `#[serde(rename_all = "...")]`.
///
/// # Errors
///
/// Unknown rule names and malformed serde attributes.
pub fn parse_rename_all(attrs: &[Attribute]) -> darling::Result<Option<RenameRule>> {
    let mut rule = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                if let Some(name) = deserialize_name(&meta)? {
                    rule = Some(RenameRule::parse(&name).ok_or_else(|| {
                        meta.error(format!("unknown rename_all rule `{name}`"))
                    })?);
                }
            } else {
                skip_meta(&meta)?;
            }
            Ok(())
        })?;
    }
    Ok(rule)
}

/// `key = "v"` or `key(deserialize = "v")`.
fn deserialize_name(meta: &ParseNestedMeta<'_>) -> syn::Result<Option<String>> {
    if meta.input.peek(Token![=]) {
        let value: LitStr = meta.value()?.parse()?;
        return Ok(Some(value.value()));
    }
    let mut name = None;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("deserialize") {
            let value: LitStr = nested.value()?.parse()?;
            name = Some(value.value());
        } else {
            skip_meta(&nested)?;
        }
        Ok(())
    })?;
    Ok(name)
}

fn skip_meta(meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(Paren) {
        meta.parse_nested_meta(|nested| skip_meta(&nested))?;
    }
    Ok(())
}
