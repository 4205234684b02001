// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! String-to-value coercion for leaf fields.
//!
//! # Supported Types
//!
//! | Type | Accepted input |
//! |------|----------------|
//! | `String` | anything, stored verbatim |
//! | `bool` | `1 t T TRUE true True` / `0 f F FALSE false False` |
//! | `i8`..`i128`, `isize` | decimal, range-checked for the declared width |
//! | `u8`..`u128`, `usize` | decimal, range-checked for the declared width |
//! | `f32`, `f64` | decimal float |
//! | timestamps | see [`parse_timestamp`](crate::timestamp::parse_timestamp) |
//! | `Option<T>` | as `T`, allocating the inner value when `None` |
//!
//! `Option<Option<T>>` is rejected with
//! [`CoerceError::NestedOptional`].

use crate::error::CoerceError;

/// A value that can be overwritten from a raw string.
pub trait Coerce {
    /// `true` for `Option` wrappers.
    const OPTIONAL: bool = false;

    /// Replace `self` with the value parsed from `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`CoerceError`] when `raw` is not valid for the type.
    fn coerce(&mut self, raw: &str) -> Result<(), CoerceError>;
}

impl Coerce for String {
    fn coerce(&mut self, raw: &str) -> Result<(), CoerceError> {
        raw.clone_into(self);
        Ok(())
    }
}

impl Coerce for bool {
    fn coerce(&mut self, raw: &str) -> Result<(), CoerceError> {
        *self = parse_bool(raw)?;
        Ok(())
    }
}

/// Parse the accepted boolean spellings.
///
/// # Errors
///
/// Returns [`CoerceError::Bool`] for any other input.
pub fn parse_bool(raw: &str) -> Result<bool, CoerceError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoerceError::Bool {
            input: raw.to_owned()
        })
    }
}

macro_rules! coerce_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Coerce for $ty {
                fn coerce(&mut self, raw: &str) -> Result<(), CoerceError> {
                    *self = raw.parse().map_err(|source| CoerceError::Integer {
                        input: raw.to_owned(),
                        source
                    })?;
                    Ok(())
                }
            }
        )*
    };
}

macro_rules! coerce_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Coerce for $ty {
                fn coerce(&mut self, raw: &str) -> Result<(), CoerceError> {
                    *self = raw.parse().map_err(|source| CoerceError::Float {
                        input: raw.to_owned(),
                        source
                    })?;
                    Ok(())
                }
            }
        )*
    };
}

coerce_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
coerce_float!(f32, f64);

impl<T> Coerce for Option<T>
where
    T: Coerce + Default
{
    const OPTIONAL: bool = true;

    fn coerce(&mut self, raw: &str) -> Result<(), CoerceError> {
        if T::OPTIONAL {
            return Err(CoerceError::NestedOptional);
        }
        self.get_or_insert_with(T::default).coerce(raw)
    }
}
