// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Attribute Quick Reference
//!
//! ## Struct-Level `#[bind(...)]`
//!
//! ```rust,ignore
//! #[derive(Default, Deserialize, Bind)]
//! #[serde(default, rename_all = "camelCase")] // JSON keys follow serde
//! #[bind(crate = "reqbind_core")]             // Optional: runtime crate path (default: ::reqbind)
//! pub struct ListUsers { /* ... */ }
//! ```
//!
//! ## Field-Level `#[bind(...)]`
//!
//! ```rust,ignore
//! pub struct ListUsers {
//!     #[bind(url = "org", rules = "required")]     // Router path parameter
//!     pub org: i64,
//!
//!     #[bind(query = "page", default = "1")]       // Query string with default
//!     pub page: u32,
//!
//!     #[bind(header = "X-Request-Id")]             // First alias only
//!     pub request_id: String,
//!
//!     #[bind(recurse)]                             // Resolve nested fields too
//!     pub filter: Filter,
//!
//!     #[bind(nested)]                              // Validate only
//!     pub sort: Option<Sort>,
//!
//!     #[bind(query = "ids")]
//!     pub ids_json: String,
//!
//!     #[serde(skip)]
//!     #[bind(raw = "ids_json")]                    // Re-decode from companion
//!     pub ids: Vec<i64>,
//! }
//! ```
//!
//! # Generated Code
//!
//! | Item | Purpose |
//! |------|---------|
//! | `impl Schema` | static descriptor table |
//! | `impl Fields` | coercion, nested access, raw re-decode, validation view |
//! | `impl Inspect` | lets the schema appear as a validated nested value |

mod bind;
mod utils;

use proc_macro::TokenStream;

/// Derive request binding for a struct with named fields.
///
/// The struct is first decoded from the JSON body with serde, so it must
/// also derive `Default` and `Deserialize` and should carry
/// `#[serde(default)]`. Query, header and path parameters, defaults, raw
/// companions and validation rules come from `#[bind(...)]`.
///
/// # Example
///
/// ```rust,ignore
/// use reqbind::Bind;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize, Bind)]
/// #[serde(default)]
/// pub struct CreateUser {
///     #[bind(url = "org", rules = "required")]
///     pub org: i64,
///
///     #[bind(rules = "required,min=2")]
///     pub name: String,
///
///     #[bind(header = "X-Locale", default = "en")]
///     pub locale: String,
/// }
/// ```
///
/// # Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `query = "k"` | query-string key |
/// | `header = "A, B"` | header name; only the first entry is used |
/// | `url = "k"` | router path parameter |
/// | `default = "lit"` | literal coerced when no source supplies a value |
/// | `nested` | nested schema, `Option<T>` for optional |
/// | `recurse` | resolve the nested schema's fields; implies `nested` |
/// | `raw = "field"` | companion field holding a JSON document |
/// | `rules = "required,max=10"` | validation rules |
#[proc_macro_derive(Bind, attributes(bind))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    bind::derive(input)
}
