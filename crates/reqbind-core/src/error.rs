// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for binding.
//!
//! Two layers:
//!
//! | Type | Raised by | Meaning |
//! |------|-----------|---------|
//! | [`CoerceError`] | [`Coerce`](crate::Coerce) | A single string could not become a field value |
//! | [`BindError`] | [`Binder`](crate::Binder) | Binding aborted; carries the field path |
//!
//! Validation failures are not errors. They are reported through
//! [`Validation`](crate::Validation) and surface to callers as
//! [`Rejection::Invalid`](crate::Rejection::Invalid).

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::path::FieldPath;

/// Failure converting one raw string into a field value.
#[derive(Debug, Error)]
pub enum CoerceError {
    /// Input is not one of the accepted boolean spellings.
    #[error("invalid boolean {input:?}")]
    Bool {
        /// Raw input.
        input: String
    },

    /// Input is not an integer or does not fit the declared width.
    #[error("invalid integer {input:?}: {source}")]
    Integer {
        /// Raw input.
        input:  String,
        /// Underlying parse failure.
        source: ParseIntError
    },

    /// Input is not a floating point number.
    #[error("invalid float {input:?}: {source}")]
    Float {
        /// Raw input.
        input:  String,
        /// Underlying parse failure.
        source: ParseFloatError
    },

    /// Input matches none of the accepted timestamp layouts.
    #[error("timestamp {input:?} matches no supported layout")]
    Timestamp {
        /// Raw input.
        input: String
    },

    /// Target is an optional wrapped in another optional.
    #[error("nested optional fields cannot be set from a string")]
    NestedOptional,

    /// Target field has no string coercion.
    #[error("field does not accept string values")]
    Unsupported
}

/// Failure that aborts binding.
///
/// Every variant raised while walking fields carries the dotted
/// [`FieldPath`] of the field involved.
#[derive(Debug, Error)]
pub enum BindError {
    /// Body is not valid JSON or does not decode into the target type.
    #[error("request body: {0}")]
    Body(#[source] serde_json::Error),

    /// A candidate or default value could not be coerced.
    #[error("field `{path}`: {source}")]
    Coerce {
        /// Field that failed.
        path:   FieldPath,
        /// Underlying coercion failure.
        #[source]
        source: CoerceError
    },

    /// A raw-JSON companion holds text that does not decode into the field.
    #[error("field `{path}`: companion `{companion}` is not valid JSON for this field: {source}")]
    RawDocument {
        /// Field being re-decoded.
        path:      FieldPath,
        /// Name of the companion text field.
        companion: &'static str,
        /// Underlying decode failure.
        #[source]
        source:    serde_json::Error
    },

    /// A field declares a validation rule that is not registered.
    #[error("field `{path}`: unknown validation rule `{rule}`")]
    UnknownRule {
        /// Field carrying the rule.
        path: FieldPath,
        /// Rule name as written.
        rule: String
    },

    /// Body could not be read from the transport.
    #[error("request body could not be read: {0}")]
    BodyRead(String)
}

impl BindError {
    /// Path of the field involved, when the failure is tied to one.
    #[must_use]
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Self::Coerce {
                path, ..
            }
            | Self::RawDocument {
                path, ..
            }
            | Self::UnknownRule {
                path, ..
            } => Some(path),
            Self::Body(_) | Self::BodyRead(_) => None
        }
    }
}
