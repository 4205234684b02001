// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dotted field paths.
//!
//! A path names a field by the chain of Rust field names leading to it from
//! the root schema: `filter.page.size`. Paths key the explicit set and appear
//! in errors and validation violations.

use std::{borrow::Borrow, fmt};

/// Dotted path from the root schema to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(String);

impl FieldPath {
    /// Path of the root schema itself.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Path of a direct child field.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_owned())
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the segments of the path.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|segment| !segment.is_empty())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FieldPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self(path.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_of_root_has_no_separator() {
        assert_eq!(FieldPath::root().child("name").as_str(), "name");
    }

    #[test]
    fn nested_children_are_dot_joined() {
        let path = FieldPath::root().child("filter").child("page").child("size");
        assert_eq!(path.to_string(), "filter.page.size");
        assert_eq!(path.segments().collect::<Vec<_>>(), ["filter", "page", "size"]);
    }

    #[test]
    fn same_name_under_different_parents_differs() {
        let a = FieldPath::root().child("a").child("id");
        let b = FieldPath::root().child("b").child("id");
        assert_ne!(a, b);
    }

    #[test]
    fn root_is_empty() {
        assert!(FieldPath::root().is_root());
        assert_eq!(FieldPath::root().segments().count(), 0);
    }
}
