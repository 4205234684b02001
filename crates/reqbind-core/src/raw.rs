// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Raw-JSON companion fields.
//!
//! A field may name a sibling text field holding a JSON document. When the
//! field is still at its zero value after source resolution, the companion
//! text is decoded into it:
//!
//! ```rust,ignore
//! #[derive(Default, Deserialize, Bind)]
//! #[serde(default)]
//! struct Filter {
//!     #[bind(query = "filter")]
//!     filter_json: String,
//!
//!     #[bind(raw = "filter_json")]
//!     #[serde(skip)]
//!     filter: HashMap<String, String>
//! }
//! ```
//!
//! An empty or absent companion leaves the field alone.

use serde::de::DeserializeOwned;
pub use serde_json::Error as DocumentError;

/// Types with a recognizable zero value.
///
/// Every `Default + PartialEq` type is covered: the zero value is the
/// default. `Option` targets go through [`redecode_optional`] instead, which
/// only asks for `None`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be compared with its zero value",
    label = "raw targets need `Default + PartialEq`",
    note = "wrap the field in `Option` to re-decode whenever it is `None`"
)]
pub trait ZeroValue {
    /// Whether `self` equals the type's zero value.
    fn is_zero(&self) -> bool;
}

impl<T> ZeroValue for T
where
    T: Default + PartialEq
{
    fn is_zero(&self) -> bool {
        *self == T::default()
    }
}

/// Text types usable as a raw-JSON companion.
pub trait RawText {
    /// Document text, if any.
    fn raw_text(&self) -> Option<&str>;
}

impl RawText for String {
    fn raw_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl RawText for Option<String> {
    fn raw_text(&self) -> Option<&str> {
        self.as_deref()
    }
}

/// Decode `companion` into `target` when `target` is zero.
///
/// Returns `Ok(true)` when the target was replaced.
///
/// # Errors
///
/// Returns the decode error when the companion text is not a valid document
/// for the target type. The target is left untouched.
pub fn redecode<T>(target: &mut T, companion: Option<&str>) -> Result<bool, DocumentError>
where
    T: DeserializeOwned + ZeroValue
{
    if !target.is_zero() {
        return Ok(false);
    }
    replace(target, companion)
}

/// Decode `companion` into an optional `target` when it is `None`.
///
/// # Errors
///
/// Same as [`redecode`].
pub fn redecode_optional<T>(
    target: &mut Option<T>,
    companion: Option<&str>
) -> Result<bool, DocumentError>
where
    T: DeserializeOwned
{
    if target.is_some() {
        return Ok(false);
    }
    replace(target, companion)
}

fn replace<T>(target: &mut T, companion: Option<&str>) -> Result<bool, DocumentError>
where
    T: DeserializeOwned
{
    let Some(text) = companion.filter(|text| !text.is_empty()) else {
        return Ok(false);
    };
    *target = serde_json::from_str(text)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Deserialize;

    use super::*;
    use crate::timestamp::Timestamp;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Device {
        platform: String,
        build:    u32
    }

    #[derive(Debug, Deserialize)]
    struct Opaque {
        id: u32
    }

    #[test]
    fn zero_values() {
        assert!(0_i32.is_zero());
        assert!(!1_u8.is_zero());
        assert!(String::new().is_zero());
        assert!(false.is_zero());
        assert!(!true.is_zero());
        assert!(None::<i32>.is_zero());
        assert!(Vec::<u8>::new().is_zero());
        assert!(serde_json::Value::Null.is_zero());
        assert!(Timestamp::default().is_zero());
        assert!(!Some(0).is_zero());
        assert!(Device::default().is_zero());
        assert!(!Device {
            platform: String::new(),
            build:    1
        }
        .is_zero());
    }

    #[test]
    fn default_struct_target_is_replaced() {
        let mut target = Device::default();
        assert!(redecode(&mut target, Some(r#"{"platform":"ios"}"#)).unwrap());
        assert_eq!(target.platform, "ios");
        assert!(!redecode(&mut target, Some(r#"{"platform":"web"}"#)).unwrap());
        assert_eq!(target.platform, "ios");
    }

    #[test]
    fn optional_target_needs_no_equality() {
        let mut target: Option<Opaque> = None;
        assert!(redecode_optional(&mut target, Some(r#"{"id":3}"#)).unwrap());
        assert_eq!(target.as_ref().map(|opaque| opaque.id), Some(3));
        assert!(!redecode_optional(&mut target, Some(r#"{"id":4}"#)).unwrap());
        assert!(!redecode_optional(&mut None::<Opaque>, Some("")).unwrap());
    }

    #[test]
    fn zero_target_is_replaced() {
        let mut target: HashMap<String, i32> = HashMap::new();
        assert!(redecode(&mut target, Some(r#"{"a":1}"#)).unwrap());
        assert_eq!(target.get("a"), Some(&1));
    }

    #[test]
    fn non_zero_target_is_kept() {
        let mut target = vec![1, 2];
        assert!(!redecode(&mut target, Some("[3]")).unwrap());
        assert_eq!(target, [1, 2]);
    }

    #[test]
    fn empty_or_absent_companion_is_skipped() {
        let mut target: Vec<i32> = Vec::new();
        assert!(!redecode(&mut target, Some("")).unwrap());
        assert!(!redecode(&mut target, None).unwrap());
        assert!(target.is_empty());
    }

    #[test]
    fn invalid_document_is_an_error() {
        let mut target: Vec<i32> = Vec::new();
        assert!(redecode(&mut target, Some("{not json")).is_err());
        assert!(target.is_empty());
    }

    #[test]
    fn companion_text_kinds() {
        assert_eq!(String::from("[]").raw_text(), Some("[]"));
        assert_eq!(None::<String>.raw_text(), None);
    }
}
