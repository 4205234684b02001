// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Static per-field binding metadata.
//!
//! Every schema carries a `&'static [FieldDescriptor]` table, one entry per
//! field in declaration order. The derive macro emits it; hand-written
//! schemas build it with the `const` builder:
//!
//! ```rust
//! use reqbind_core::FieldDescriptor;
//!
//! const FIELDS: &[FieldDescriptor] = &[
//!     FieldDescriptor::new("page", "page").query("page").default_value("1"),
//!     FieldDescriptor::new("token", "token").header("Authorization,X-Token"),
//!     FieldDescriptor::new("id", "id").url("id").rules("required")
//! ];
//!
//! assert_eq!(FIELDS[1].header_key(), Some("Authorization"));
//! ```
//!
//! # Keys
//!
//! | Builder | Source | Empty string |
//! |---------|--------|--------------|
//! | [`query`](FieldDescriptor::query) | query string | no binding |
//! | [`header`](FieldDescriptor::header) | header, first comma alias | no binding |
//! | [`url`](FieldDescriptor::url) | path parameter, first comma segment | no binding |
//! | [`default_value`](FieldDescriptor::default_value) | literal | no default |
//!
//! Nested tables are referenced by pointer, so descriptor graphs are acyclic
//! whenever the Rust types are: a schema cannot contain itself by value.

/// Where a field value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Query-string parameter.
    Query,
    /// Request header.
    Header,
    /// Router path parameter.
    Url,
    /// JSON body key.
    Json
}

impl SourceKind {
    /// Label used in validation messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Query => "param",
            Self::Header => "header",
            Self::Url => "url",
            Self::Json => "json"
        }
    }
}

/// Structural kind of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Leaf value set from a single string.
    Scalar,
    /// Nested schema stored inline.
    Nested(&'static [FieldDescriptor]),
    /// Nested schema behind `Option`, allocated on demand.
    OptionalNested(&'static [FieldDescriptor])
}

impl FieldKind {
    /// Child descriptor table for nested kinds.
    #[must_use]
    pub const fn children(&self) -> Option<&'static [FieldDescriptor]> {
        match self {
            Self::Scalar => None,
            Self::Nested(children) | Self::OptionalNested(children) => Some(*children)
        }
    }

    /// Whether the nested schema sits behind `Option`.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::OptionalNested(_))
    }
}

/// Binding metadata for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    name:    &'static str,
    json:    &'static str,
    aliases: &'static [&'static str],
    kind:    FieldKind,
    query:   Option<&'static str>,
    header:  Option<&'static str>,
    url:     Option<&'static str>,
    default: Option<&'static str>,
    recurse: bool,
    raw:     Option<&'static str>,
    rules:   Option<&'static str>
}

impl FieldDescriptor {
    /// Scalar field with no sources besides its JSON key.
    ///
    /// `name` is the Rust field name used in paths. `json` is the body key;
    /// pass `""` when the field is not deserialized from the body.
    #[must_use]
    pub const fn new(name: &'static str, json: &'static str) -> Self {
        Self {
            name,
            json,
            aliases: &[],
            kind: FieldKind::Scalar,
            query: None,
            header: None,
            url: None,
            default: None,
            recurse: false,
            raw: None,
            rules: None
        }
    }

    /// Extra body keys accepted for this field (`#[serde(alias)]`).
    #[must_use]
    pub const fn json_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Mark as an inline nested schema.
    #[must_use]
    pub const fn nested(mut self, children: &'static [FieldDescriptor]) -> Self {
        self.kind = FieldKind::Nested(children);
        self
    }

    /// Mark as an optional nested schema.
    #[must_use]
    pub const fn optional_nested(mut self, children: &'static [FieldDescriptor]) -> Self {
        self.kind = FieldKind::OptionalNested(children);
        self
    }

    /// Bind from a query-string key.
    #[must_use]
    pub const fn query(mut self, key: &'static str) -> Self {
        self.query = Some(key);
        self
    }

    /// Bind from a header. A comma-separated list uses only its first entry.
    #[must_use]
    pub const fn header(mut self, names: &'static str) -> Self {
        self.header = Some(names);
        self
    }

    /// Bind from a router path parameter.
    #[must_use]
    pub const fn url(mut self, key: &'static str) -> Self {
        self.url = Some(key);
        self
    }

    /// Literal used when no source supplies a value.
    #[must_use]
    pub const fn default_value(mut self, literal: &'static str) -> Self {
        self.default = Some(literal);
        self
    }

    /// Resolve the nested schema's fields instead of treating it as a leaf.
    #[must_use]
    pub const fn recurse(mut self) -> Self {
        self.recurse = true;
        self
    }

    /// Re-decode from the named text field when left at its zero value.
    #[must_use]
    pub const fn raw(mut self, companion: &'static str) -> Self {
        self.raw = Some(companion);
        self
    }

    /// Comma-separated validation rules.
    #[must_use]
    pub const fn rules(mut self, rules: &'static str) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Rust field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// JSON body key, if the field is read from the body.
    #[must_use]
    pub fn json_key(&self) -> Option<&'static str> {
        non_empty(Some(self.json))
    }

    /// Every body key that decodes into this field: the primary key, then
    /// its aliases. Empty when the field is not read from the body.
    pub fn json_keys(&self) -> impl Iterator<Item = &'static str> {
        let aliases = if self.json_key().is_some() { self.aliases } else { &[] };
        self.json_key()
            .into_iter()
            .chain(aliases.iter().copied().filter(|alias| !alias.is_empty()))
    }

    /// Structural kind.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Query-string key.
    #[must_use]
    pub fn query_key(&self) -> Option<&'static str> {
        non_empty(self.query)
    }

    /// Header name: the first entry of the configured list.
    #[must_use]
    pub fn header_key(&self) -> Option<&'static str> {
        first_alias(self.header)
    }

    /// Path parameter key: the first entry of the configured list.
    #[must_use]
    pub fn url_key(&self) -> Option<&'static str> {
        first_alias(self.url)
    }

    /// Default literal.
    #[must_use]
    pub fn default_literal(&self) -> Option<&'static str> {
        non_empty(self.default)
    }

    /// Whether the walker descends into this field.
    ///
    /// Only nested kinds recurse; the flag is ignored on scalars.
    #[must_use]
    pub const fn recurses(&self) -> bool {
        self.recurse && self.kind.children().is_some()
    }

    /// Name of the raw-JSON companion field.
    #[must_use]
    pub fn raw_companion(&self) -> Option<&'static str> {
        non_empty(self.raw)
    }

    /// Validation rule string.
    #[must_use]
    pub fn rule_list(&self) -> Option<&'static str> {
        non_empty(self.rules)
    }

    /// Source and key named in validation messages.
    ///
    /// The highest-priority configured source wins: path parameter, then
    /// header, then query, then the JSON key (or field name without one).
    #[must_use]
    pub fn message_source(&self) -> (SourceKind, &'static str) {
        if let Some(key) = self.url_key() {
            (SourceKind::Url, key)
        } else if let Some(key) = self.header_key() {
            (SourceKind::Header, key)
        } else if let Some(key) = self.query_key() {
            (SourceKind::Query, key)
        } else {
            (SourceKind::Json, self.json_key().unwrap_or(self.name))
        }
    }
}

fn non_empty(value: Option<&'static str>) -> Option<&'static str> {
    value.filter(|value| !value.is_empty())
}

fn first_alias(list: Option<&'static str>) -> Option<&'static str> {
    let list = list?;
    let first = list.split(',').next().unwrap_or(list).trim();
    non_empty(Some(first))
}
