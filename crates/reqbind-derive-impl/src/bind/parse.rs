// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the Bind derive.
//!
//! # Module Structure
//!
//! ```text
//! parse/
//! ├── schema.rs  — SchemaAttrs (darling) and SchemaDef
//! ├── field.rs   — FieldDef, delegating to source.rs / shape.rs
//! ├── serde_attrs.rs — JSON key from #[serde(rename, rename_all, skip)]
//! └── tests.rs   — Unit tests
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let schema = SchemaDef::from_derive_input(&input)?;
//!
//! for field in schema.fields() {
//!     let key = schema.json_key(field);
//!     let kind = field.kind();
//! }
//! ```

mod field;
mod schema;
mod serde_attrs;

pub use field::{FieldDef, FieldKind, ShapeConfig, SourceConfig};
pub use schema::{SchemaAttrs, SchemaDef};
pub use serde_attrs::{RenameRule, SerdeField};
