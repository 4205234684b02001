// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Bind derive macro implementation.
//!
//! # Architecture
//!
//! ```text
//! bind.rs (orchestrator)
//! │
//! ├── parse/          → SchemaDef, FieldDef, serde key rules
//! │
//! ├── descriptors.rs  → impl Schema (static FieldDescriptor table)
//! └── accessors.rs    → impl Fields, impl Inspect
//! ```
//!
//! # Generated Code
//!
//! For a schema like:
//!
//! ```rust,ignore
//! #[derive(Default, Deserialize, Bind)]
//! #[serde(default)]
//! pub struct Page {
//!     #[bind(query = "size", default = "20", rules = "max=100")]
//!     pub size: u32,
//! }
//! ```
//!
//! The macro generates:
//!
//! | Item | Content |
//! |------|---------|
//! | `impl Schema for Page` | `DESCRIPTORS = &[FieldDescriptor::new("size", "size").query("size")...]` |
//! | `impl Fields for Page` | `assign` arm coercing `size`, `inspect` arm for its rules |
//! | `impl Inspect for Page` | opaque subject |

mod accessors;
mod descriptors;
pub mod parse;

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::SchemaDef;

/// Main entry point for the Bind derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match SchemaDef::from_derive_input(&input) {
        Ok(schema) => generate(&schema).into(),
        Err(err) => err.write_errors().into()
    }
}

fn generate(schema: &SchemaDef) -> proc_macro2::TokenStream {
    let descriptors = descriptors::generate(schema);
    let accessors = accessors::generate(schema);

    quote! {
        #descriptors
        #accessors
    }
}
