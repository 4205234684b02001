// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structural walker.
//!
//! Visits every leaf of a schema value in declaration order. Nested fields
//! are descended into only when their descriptor carries the recursion
//! directive; an absent optional nested value is allocated before descent.
//! Everything else, nested or not, is handed to the visitor as a leaf.

use crate::{descriptor::FieldDescriptor, error::BindError, path::FieldPath, schema::Fields};

/// Callback invoked for each leaf.
pub trait Visit {
    /// Handle the field at `index` of `target`.
    ///
    /// # Errors
    ///
    /// Any error stops the walk and is returned from [`walk`].
    fn leaf(
        &mut self,
        target: &mut dyn Fields,
        index: usize,
        field: &FieldDescriptor,
        path: &FieldPath
    ) -> Result<(), BindError>;
}

/// Walk `target`, whose own path is `prefix`.
///
/// # Errors
///
/// Propagates the first visitor error.
pub fn walk<V>(target: &mut dyn Fields, prefix: &FieldPath, visitor: &mut V) -> Result<(), BindError>
where
    V: Visit + ?Sized
{
    for (index, field) in target.descriptors().iter().enumerate() {
        let path = prefix.child(field.name());
        if field.recurses() {
            if let Some(inner) = target.nested_mut(index) {
                walk(inner, &path, visitor)?;
            }
            continue;
        }
        visitor.leaf(target, index, field, &path)?;
    }
    Ok(())
}
