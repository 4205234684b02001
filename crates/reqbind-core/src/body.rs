// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! JSON body collection.
//!
//! The body is read twice: once as an untyped document to learn which keys
//! are present, then as the typed target. Key presence alone marks a path
//! explicit, whatever the value (`""`, `0`, `false` and `null` included).

use serde::de::Error as _;
use serde_json::{Map, Value};
use tracing::trace;

use crate::{
    descriptor::FieldDescriptor, error::BindError, explicit::ExplicitSet, path::FieldPath,
    schema::Schema
};

/// Mark every descriptor whose JSON key, or one of its aliases, appears in
/// `document`.
///
/// Descends into nested descriptors whose value is itself an object.
pub fn mark_json_keys(
    descriptors: &'static [FieldDescriptor],
    document: &Map<String, Value>,
    prefix: &FieldPath,
    explicit: &mut ExplicitSet
) {
    for field in descriptors {
        let Some(value) = field.json_keys().find_map(|key| document.get(key)) else {
            continue;
        };
        let path = prefix.child(field.name());
        if let (Some(children), Value::Object(inner)) = (field.kind().children(), value) {
            mark_json_keys(children, inner, &path, explicit);
        }
        trace!(path = %path, "set by body");
        explicit.mark(path);
    }
}

/// Decode a non-empty body into `T`, marking present keys.
///
/// A `null` document leaves the target at its default.
///
/// # Errors
///
/// Returns [`BindError::Body`] for malformed JSON, a document that is
/// neither an object nor `null`, or one that does not fit `T`.
pub fn decode<T>(body: &[u8], explicit: &mut ExplicitSet) -> Result<T, BindError>
where
    T: Schema
{
    let document: Value = serde_json::from_slice(body).map_err(BindError::Body)?;
    match &document {
        Value::Object(map) => mark_json_keys(T::DESCRIPTORS, map, &FieldPath::root(), explicit),
        Value::Null => return Ok(T::default()),
        _ => {
            return Err(BindError::Body(serde_json::Error::custom(
                "request body must be a JSON object"
            )));
        }
    }
    serde_json::from_value(document).map_err(BindError::Body)
}
