// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type-erased view of a field value for validation rules.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::timestamp::Timestamp;

/// Value as seen by a rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Subject<'a> {
    /// `None` optional.
    Absent,
    /// Text.
    Str(&'a str),
    /// Boolean.
    Bool(bool),
    /// Signed integer, widened without loss.
    Int(i128),
    /// Unsigned integer, widened without loss.
    Uint(u128),
    /// Floating point.
    Float(f64),
    /// Instant.
    Time(DateTime<Utc>),
    /// Collection length.
    Len(usize),
    /// Value with no rule-visible content, such as a nested schema.
    Opaque
}

impl Subject<'_> {
    /// Whether the value equals its type's zero value.
    ///
    /// Opaque values never count as zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match *self {
            Self::Absent => true,
            Self::Str(text) => text.is_empty(),
            Self::Bool(value) => !value,
            Self::Int(value) => value == 0,
            Self::Uint(value) => value == 0,
            Self::Float(value) => value == 0.0,
            Self::Time(value) => value == DateTime::<Utc>::default(),
            Self::Len(len) => len == 0,
            Self::Opaque => false
        }
    }
}

/// Types that expose a [`Subject`] to validation rules.
pub trait Inspect {
    /// Current value.
    fn subject(&self) -> Subject<'_>;

    /// `true` for `Option` wrappers.
    fn is_optional(&self) -> bool {
        false
    }
}

/// Subject of a field together with its optionality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inspected<'a> {
    subject:  Subject<'a>,
    optional: bool
}

impl<'a> Inspected<'a> {
    /// Inspect a field value.
    pub fn of<T>(value: &'a T) -> Self
    where
        T: Inspect + ?Sized
    {
        Self {
            subject:  value.subject(),
            optional: value.is_optional()
        }
    }

    /// Current value.
    #[must_use]
    pub const fn subject(&self) -> Subject<'a> {
        self.subject
    }

    /// Whether the field counts as empty for `required` and `omitempty`.
    ///
    /// Optionals are empty only when `None`; a present optional holding a
    /// zero value is not empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        if self.optional {
            matches!(self.subject, Subject::Absent)
        } else {
            self.subject.is_zero()
        }
    }
}

impl Inspect for String {
    fn subject(&self) -> Subject<'_> {
        Subject::Str(self)
    }
}

impl Inspect for str {
    fn subject(&self) -> Subject<'_> {
        Subject::Str(self)
    }
}

impl Inspect for bool {
    fn subject(&self) -> Subject<'_> {
        Subject::Bool(*self)
    }
}

macro_rules! inspect_number {
    ($variant:ident as $wide:ty: $($ty:ty),*) => {
        $(
            impl Inspect for $ty {
                fn subject(&self) -> Subject<'_> {
                    Subject::$variant(<$wide>::from(*self))
                }
            }
        )*
    };
}

inspect_number!(Int as i128: i8, i16, i32, i64, i128);
inspect_number!(Uint as u128: u8, u16, u32, u64, u128);
inspect_number!(Float as f64: f32, f64);

impl Inspect for isize {
    fn subject(&self) -> Subject<'_> {
        i128::try_from(*self).map_or(Subject::Opaque, Subject::Int)
    }
}

impl Inspect for usize {
    fn subject(&self) -> Subject<'_> {
        u128::try_from(*self).map_or(Subject::Opaque, Subject::Uint)
    }
}

impl Inspect for DateTime<Utc> {
    fn subject(&self) -> Subject<'_> {
        Subject::Time(*self)
    }
}

impl Inspect for Timestamp {
    fn subject(&self) -> Subject<'_> {
        Subject::Time(self.0)
    }
}

impl Inspect for NaiveDateTime {
    fn subject(&self) -> Subject<'_> {
        Subject::Time(self.and_utc())
    }
}

impl Inspect for NaiveDate {
    fn subject(&self) -> Subject<'_> {
        self.and_hms_opt(0, 0, 0)
            .map_or(Subject::Opaque, |midnight| Subject::Time(midnight.and_utc()))
    }
}

impl<T> Inspect for Vec<T> {
    fn subject(&self) -> Subject<'_> {
        Subject::Len(self.len())
    }
}

impl<K, V, S> Inspect for HashMap<K, V, S> {
    fn subject(&self) -> Subject<'_> {
        Subject::Len(self.len())
    }
}

impl<K, V> Inspect for BTreeMap<K, V> {
    fn subject(&self) -> Subject<'_> {
        Subject::Len(self.len())
    }
}

impl Inspect for serde_json::Value {
    fn subject(&self) -> Subject<'_> {
        use serde_json::Value;
        match self {
            Value::Null => Subject::Absent,
            Value::Bool(value) => Subject::Bool(*value),
            Value::Number(number) => number
                .as_i64()
                .map(|value| Subject::Int(value.into()))
                .or_else(|| number.as_u64().map(|value| Subject::Uint(value.into())))
                .or_else(|| number.as_f64().map(Subject::Float))
                .unwrap_or(Subject::Opaque),
            Value::String(text) => Subject::Str(text),
            Value::Array(items) => Subject::Len(items.len()),
            Value::Object(map) => Subject::Len(map.len())
        }
    }
}

impl<T> Inspect for Option<T>
where
    T: Inspect
{
    fn subject(&self) -> Subject<'_> {
        self.as_ref().map_or(Subject::Absent, Inspect::subject)
    }

    fn is_optional(&self) -> bool {
        true
    }
}
