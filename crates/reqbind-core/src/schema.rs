// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema traits implemented by `#[derive(Bind)]`.
//!
//! # Architecture
//!
//! ```text
//! Schema (static)                 Fields (object safe)
//! ├── DESCRIPTORS                 ├── descriptors()
//! ├── Default                     ├── assign(index, raw)
//! └── DeserializeOwned            ├── nested_mut(index) / nested(index)
//!                                 ├── redecode(index)
//!                                 └── inspect(index)
//! ```
//!
//! The binder walks values through `&mut dyn Fields`, so nested schemas of
//! different types are visited by one non-generic traversal. Every `index`
//! is a position in [`Fields::descriptors`].

use serde::de::DeserializeOwned;

use crate::{
    descriptor::FieldDescriptor, error::CoerceError, raw::DocumentError, validate::Inspected
};

/// Per-field access used while binding.
///
/// Methods receive an index into [`descriptors`](Self::descriptors).
/// Indices that do not apply to the operation return the documented
/// fallback.
pub trait Fields {
    /// Descriptor table of the concrete type.
    fn descriptors(&self) -> &'static [FieldDescriptor];

    /// Coerce a raw string into a scalar field.
    ///
    /// # Errors
    ///
    /// Returns the coercion failure, or [`CoerceError::Unsupported`] when the
    /// field is not a scalar.
    fn assign(&mut self, index: usize, raw: &str) -> Result<(), CoerceError>;

    /// Mutable access to a nested schema, allocating an absent optional one.
    ///
    /// Returns `None` for non-nested fields.
    fn nested_mut(&mut self, index: usize) -> Option<&mut dyn Fields>;

    /// Shared access to a nested schema. Returns `None` when absent.
    fn nested(&self, index: usize) -> Option<&dyn Fields>;

    /// Re-decode a field from its raw-JSON companion.
    ///
    /// Returns `Ok(true)` when the field was replaced.
    ///
    /// # Errors
    ///
    /// Returns the decode failure for invalid companion text.
    fn redecode(&mut self, index: usize) -> Result<bool, DocumentError> {
        let _ = index;
        Ok(false)
    }

    /// View of a field for validation. `None` when the field has no rules.
    fn inspect(&self, index: usize) -> Option<Inspected<'_>>;
}

/// A request-bindable type.
///
/// Implemented by `#[derive(Bind)]`. The type is first decoded from the JSON
/// body with serde, so it should carry `#[serde(default)]` to tolerate
/// missing keys.
pub trait Schema: Fields + Default + DeserializeOwned {
    /// Descriptor table, one entry per field in declaration order.
    const DESCRIPTORS: &'static [FieldDescriptor];
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Hand-written schemas shared by unit tests.

    use serde::Deserialize;

    use super::*;
    use crate::{coerce::Coerce, raw, validate::Inspect};

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct Page {
        pub size: u32,
        pub cursor: Option<String>
    }

    impl Schema for Page {
        const DESCRIPTORS: &'static [FieldDescriptor] = &[
            FieldDescriptor::new("size", "size")
                .query("size")
                .default_value("20")
                .rules("max=100"),
            FieldDescriptor::new("cursor", "cursor").header("X-Cursor")
        ];
    }

    impl Fields for Page {
        fn descriptors(&self) -> &'static [FieldDescriptor] {
            Self::DESCRIPTORS
        }

        fn assign(&mut self, index: usize, raw: &str) -> Result<(), CoerceError> {
            match index {
                0 => self.size.coerce(raw),
                1 => self.cursor.coerce(raw),
                _ => Err(CoerceError::Unsupported)
            }
        }

        fn nested_mut(&mut self, _: usize) -> Option<&mut dyn Fields> {
            None
        }

        fn nested(&self, _: usize) -> Option<&dyn Fields> {
            None
        }

        fn inspect(&self, index: usize) -> Option<Inspected<'_>> {
            match index {
                0 => Some(Inspected::of(&self.size)),
                _ => None
            }
        }
    }

    impl Inspect for Page {
        fn subject(&self) -> crate::validate::Subject<'_> {
            crate::validate::Subject::Opaque
        }
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct Search {
        pub id: i64,
        pub term: String,
        pub verbose: bool,
        pub page: Page,
        pub next: Option<Page>,
        pub tags_json: String,
        #[serde(skip)]
        pub tags: Vec<String>
    }

    impl Schema for Search {
        const DESCRIPTORS: &'static [FieldDescriptor] = &[
            FieldDescriptor::new("id", "id").url("id").rules("required"),
            FieldDescriptor::new("term", "term")
                .query("q")
                .header("X-Term")
                .rules("omitempty,min=2"),
            FieldDescriptor::new("verbose", "verbose")
                .query("verbose")
                .default_value("true"),
            FieldDescriptor::new("page", "page").nested(Page::DESCRIPTORS).recurse(),
            FieldDescriptor::new("next", "next")
                .optional_nested(Page::DESCRIPTORS)
                .recurse(),
            FieldDescriptor::new("tags_json", "tags_json").query("tags"),
            FieldDescriptor::new("tags", "").raw("tags_json")
        ];
    }

    impl Fields for Search {
        fn descriptors(&self) -> &'static [FieldDescriptor] {
            Self::DESCRIPTORS
        }

        fn assign(&mut self, index: usize, raw: &str) -> Result<(), CoerceError> {
            match index {
                0 => self.id.coerce(raw),
                1 => self.term.coerce(raw),
                2 => self.verbose.coerce(raw),
                5 => self.tags_json.coerce(raw),
                _ => Err(CoerceError::Unsupported)
            }
        }

        fn nested_mut(&mut self, index: usize) -> Option<&mut dyn Fields> {
            match index {
                3 => Some(&mut self.page as &mut dyn Fields),
                4 => Some(self.next.get_or_insert_with(Page::default) as &mut dyn Fields),
                _ => None
            }
        }

        fn nested(&self, index: usize) -> Option<&dyn Fields> {
            match index {
                3 => Some(&self.page as &dyn Fields),
                4 => self.next.as_ref().map(|next| next as &dyn Fields),
                _ => None
            }
        }

        fn redecode(&mut self, index: usize) -> Result<bool, DocumentError> {
            match index {
                6 => raw::redecode(&mut self.tags, Some(self.tags_json.as_str())),
                _ => Ok(false)
            }
        }

        fn inspect(&self, index: usize) -> Option<Inspected<'_>> {
            match index {
                0 => Some(Inspected::of(&self.id)),
                1 => Some(Inspected::of(&self.term)),
                _ => None
            }
        }
    }
}
