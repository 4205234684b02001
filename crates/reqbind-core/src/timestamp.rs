// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Lenient timestamp parsing.
//!
//! # Layouts
//!
//! Tried in order, first match wins:
//!
//! | # | Layout | Example |
//! |---|--------|---------|
//! | 1 | RFC 3339 | `2024-03-01T10:00:00+02:00` |
//! | 2 | `YYYY-MM-DD HH:MM:SS` | `2024-03-01 10:00:00` |
//! | 3 | `YYYY-MM-DD` | `2024-03-01` |
//! | 4 | `YYYY/MM/DD HH:MM:SS` | `2024/03/01 10:00:00` |
//! | 5 | `YYYY/MM/DD` | `2024/03/01` |
//! | 6 | `YYYY.MM.DD HH:MM:SS` | `2024.03.01 10:00:00` |
//! | 7 | `YYYY.MM.DD` | `2024.03.01` |
//! | 8 | digits only | `1709287200` (≤ 10 digits: seconds, else milliseconds) |
//!
//! Layouts without a zone are read as UTC.
//!
//! [`Timestamp`] applies the same rules when deserializing, so a JSON body
//! may carry either an RFC 3339 string, any layout above, or a number. For a
//! plain `DateTime<Utc>` field use the [`flexible`] serde module.

use std::{fmt, ops::Deref, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Unexpected, Visitor}
};

use crate::{coerce::Coerce, error::CoerceError};

enum Layout {
    DateTime(&'static str),
    Date(&'static str)
}

const LAYOUTS: &[Layout] = &[
    Layout::DateTime("%Y-%m-%d %H:%M:%S"),
    Layout::Date("%Y-%m-%d"),
    Layout::DateTime("%Y/%m/%d %H:%M:%S"),
    Layout::Date("%Y/%m/%d"),
    Layout::DateTime("%Y.%m.%d %H:%M:%S"),
    Layout::Date("%Y.%m.%d")
];

/// Parse a timestamp in any accepted layout.
///
/// # Errors
///
/// Returns [`CoerceError::Timestamp`] when no layout matches.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, CoerceError> {
    let input = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for layout in LAYOUTS {
        let parsed = match layout {
            Layout::DateTime(format) => NaiveDateTime::parse_from_str(input, format)
                .ok()
                .map(|naive| naive.and_utc()),
            Layout::Date(format) => NaiveDate::parse_from_str(input, format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        };
        if let Some(parsed) = parsed {
            return Ok(parsed);
        }
    }
    from_epoch_digits(input).ok_or_else(|| CoerceError::Timestamp {
        input: raw.to_owned()
    })
}

/// Interpret an all-digit string as a Unix timestamp.
///
/// Up to ten digits are seconds, longer strings are milliseconds.
#[must_use]
pub fn from_epoch_digits(digits: &str) -> Option<DateTime<Utc>> {
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    if digits.len() <= 10 {
        DateTime::from_timestamp(value, 0)
    } else {
        DateTime::from_timestamp_millis(value)
    }
}

/// UTC instant that accepts every layout of [`parse_timestamp`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Wrapped instant.
    #[must_use]
    pub const fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl Deref for Timestamp {
    type Target = DateTime<Utc>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

impl FromStr for Timestamp {
    type Err = CoerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_timestamp(s).map(Self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>
    {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

#[derive(Clone, Copy)]
struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 string, a date string or a Unix timestamp")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error
    {
        parse_timestamp(v)
            .map(Timestamp)
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error
    {
        u64::try_from(v)
            .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
            .and_then(|v| self.visit_u64(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error
    {
        from_epoch_digits(&v.to_string())
            .map(Timestamp)
            .ok_or_else(|| E::invalid_value(Unexpected::Unsigned(v), &self))
    }
}

impl Coerce for Timestamp {
    fn coerce(&mut self, raw: &str) -> Result<(), CoerceError> {
        self.0 = parse_timestamp(raw)?;
        Ok(())
    }
}

impl Coerce for DateTime<Utc> {
    fn coerce(&mut self, raw: &str) -> Result<(), CoerceError> {
        *self = parse_timestamp(raw)?;
        Ok(())
    }
}

impl Coerce for NaiveDateTime {
    fn coerce(&mut self, raw: &str) -> Result<(), CoerceError> {
        *self = parse_timestamp(raw)?.naive_utc();
        Ok(())
    }
}

impl Coerce for NaiveDate {
    fn coerce(&mut self, raw: &str) -> Result<(), CoerceError> {
        *self = parse_timestamp(raw)?.date_naive();
        Ok(())
    }
}

/// Serde adapter for `DateTime<Utc>` fields using the lenient layouts.
///
/// ```rust
/// use chrono::{DateTime, Utc};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Event {
///     #[serde(with = "reqbind_core::timestamp::flexible")]
///     at: DateTime<Utc>
/// }
///
/// let event: Event = serde_json::from_str(r#"{"at":"2024-03-01"}"#).unwrap();
/// assert_eq!(event.at.to_rfc3339(), "2024-03-01T00:00:00+00:00");
/// ```
pub mod flexible {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Timestamp;

    /// Serialize as RFC 3339.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        value.serialize(serializer)
    }

    /// Deserialize from any accepted layout or a number.
    ///
    /// # Errors
    ///
    /// Fails when the input matches no layout.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>
    {
        Timestamp::deserialize(deserializer).map(Timestamp::into_inner)
    }

    /// Same adapter for `Option<DateTime<Utc>>`.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        use super::Timestamp;

        /// Serialize as RFC 3339 or null.
        ///
        /// # Errors
        ///
        /// Propagates serializer errors.
        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer
        {
            value.serialize(serializer)
        }

        /// Deserialize from null, any accepted layout or a number.
        ///
        /// # Errors
        ///
        /// Fails when a non-null input matches no layout.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>
        {
            Option::<Timestamp>::deserialize(deserializer).map(|value| value.map(Timestamp::into_inner))
        }
    }
}
