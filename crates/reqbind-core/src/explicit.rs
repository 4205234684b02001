// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Set of field paths already given a value by a higher-priority source.

use std::collections::HashSet;

use crate::path::FieldPath;

/// Paths that lower-priority sources must not overwrite.
///
/// Populated from JSON body keys before field resolution, then extended as
/// each field takes a value from a query, header or path candidate. Defaults
/// never mark a path.
#[derive(Debug, Clone, Default)]
pub struct ExplicitSet {
    paths: HashSet<FieldPath>
}

impl ExplicitSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a path. Returns `false` if it was already marked.
    pub fn mark(&mut self, path: FieldPath) -> bool {
        self.paths.insert(path)
    }

    /// Whether a path is marked.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Number of marked paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether nothing is marked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over marked paths in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldPath> {
        self.paths.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_is_idempotent() {
        let mut set = ExplicitSet::new();
        assert!(set.mark(FieldPath::from("name")));
        assert!(!set.mark(FieldPath::from("name")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn lookup_uses_full_path() {
        let mut set = ExplicitSet::new();
        set.mark(FieldPath::root().child("inner").child("name"));
        assert!(set.contains("inner.name"));
        assert!(!set.contains("name"));
    }
}
