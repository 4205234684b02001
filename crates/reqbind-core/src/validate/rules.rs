// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rule-string parsing and the built-in rule set.
//!
//! # Built-in Rules
//!
//! | Rule | Applies to | Passes when |
//! |------|-----------|-------------|
//! | `number` | text, integers | text is ASCII digits only |
//! | `numeric` | text, numbers | text is an optionally signed decimal |
//! | `alpha` / `alphanum` | text | ASCII letters (and digits) only |
//! | `email` / `url` | text | valid per the `validator` crate |
//! | `min` / `max` / `len` | text (chars), collections, numbers | size or value bound |
//! | `gt` / `gte` / `lt` / `lte` | same as `min` | strict or inclusive bound |
//! | `eq` / `ne` | text, numbers, booleans, collections | equality with the parameter |
//! | `oneof` | text, integers | value is one of the space-separated options |
//! | `contains` / `startswith` / `endswith` | text | substring test |
//! | `lowercase` / `uppercase` | text | non-empty and already in that case |
//!
//! `required` and `omitempty` are handled by the validator itself.
//!
//! Sizes go through [`ValidateLength`] and numbers through
//! [`ValidateRange`]. Integers are compared as integers; a fractional
//! parameter on an integer field falls back to a float comparison.

use std::{str::FromStr, sync::Arc};

use validator::{ValidateContains, ValidateEmail, ValidateLength, ValidateRange, ValidateUrl};

use super::Subject;
use crate::coerce::parse_bool;

/// Rule check: value and optional parameter in, pass/fail out.
pub type RuleFn = dyn Fn(Subject<'_>, Option<&str>) -> bool + Send + Sync;

/// Keyword for the presence rule.
pub const REQUIRED: &str = "required";

/// Keyword for the skip-when-empty rule.
pub const OMITEMPTY: &str = "omitempty";

/// One parsed entry of a rule string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSpec<'s> {
    /// Rule name.
    pub name:  &'s str,
    /// Parameter after `=`.
    pub param: Option<&'s str>
}

impl RuleSpec<'_> {
    /// Rule as written, e.g. `min=3`.
    #[must_use]
    pub fn display(&self) -> String {
        match self.param {
            Some(param) => format!("{}={param}", self.name),
            None => self.name.to_owned()
        }
    }
}

/// Split a rule string into entries, skipping blanks.
pub fn parse(rules: &str) -> impl Iterator<Item = RuleSpec<'_>> {
    rules
        .split(',')
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
        .map(|rule| match rule.split_once('=') {
            Some((name, param)) => RuleSpec {
                name:  name.trim(),
                param: Some(param.trim())
            },
            None => RuleSpec {
                name:  rule,
                param: None
            }
        })
}

/// Built-in rules, keyed by name.
pub(crate) fn builtin() -> Vec<(&'static str, Arc<RuleFn>)> {
    vec![
        entry("number", number),
        entry("numeric", numeric),
        entry("alpha", alpha),
        entry("alphanum", alphanum),
        entry("email", email),
        entry("url", url),
        entry("min", |s, p| bound(s, p, Bound::AtLeast)),
        entry("max", |s, p| bound(s, p, Bound::AtMost)),
        entry("len", |s, p| bound(s, p, Bound::Exactly)),
        entry("gt", |s, p| bound(s, p, Bound::Above)),
        entry("gte", |s, p| bound(s, p, Bound::AtLeast)),
        entry("lt", |s, p| bound(s, p, Bound::Below)),
        entry("lte", |s, p| bound(s, p, Bound::AtMost)),
        entry("eq", |s, p| p.is_some_and(|p| equals(s, p))),
        entry("ne", |s, p| p.is_some_and(|p| !equals(s, p))),
        entry("oneof", oneof),
        entry("contains", |s, p| text_test(s, p, |text, needle| text.validate_contains(needle))),
        entry("startswith", |s, p| {
            text_test(s, p, |text, prefix| text.starts_with(prefix))
        }),
        entry("endswith", |s, p| text_test(s, p, |text, suffix| text.ends_with(suffix))),
        entry("lowercase", lowercase),
        entry("uppercase", uppercase)
    ]
}

pub(crate) fn entry<F>(name: &'static str, check: F) -> (&'static str, Arc<RuleFn>)
where
    F: Fn(Subject<'_>, Option<&str>) -> bool + Send + Sync + 'static
{
    (name, Arc::new(check))
}

fn number(subject: Subject<'_>, _: Option<&str>) -> bool {
    match subject {
        Subject::Str(text) => is_digits(text),
        Subject::Int(_) | Subject::Uint(_) => true,
        _ => false
    }
}

fn numeric(subject: Subject<'_>, _: Option<&str>) -> bool {
    match subject {
        Subject::Str(text) => is_decimal(text),
        Subject::Int(_) | Subject::Uint(_) | Subject::Float(_) => true,
        _ => false
    }
}

fn alpha(subject: Subject<'_>, _: Option<&str>) -> bool {
    matches!(subject, Subject::Str(text)
        if !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic()))
}

fn alphanum(subject: Subject<'_>, _: Option<&str>) -> bool {
    matches!(subject, Subject::Str(text)
        if !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric()))
}

fn email(subject: Subject<'_>, _: Option<&str>) -> bool {
    matches!(subject, Subject::Str(text) if text.validate_email())
}

fn url(subject: Subject<'_>, _: Option<&str>) -> bool {
    matches!(subject, Subject::Str(text) if text.validate_url())
}

fn lowercase(subject: Subject<'_>, _: Option<&str>) -> bool {
    matches!(subject, Subject::Str(text) if !text.is_empty() && text == text.to_lowercase())
}

fn uppercase(subject: Subject<'_>, _: Option<&str>) -> bool {
    matches!(subject, Subject::Str(text) if !text.is_empty() && text == text.to_uppercase())
}

fn oneof(subject: Subject<'_>, param: Option<&str>) -> bool {
    let Some(options) = param else {
        return false;
    };
    options.split_whitespace().any(|option| match subject {
        Subject::Str(text) => text == option,
        Subject::Int(value) => option.parse::<i128>().is_ok_and(|option| option == value),
        Subject::Uint(value) => option.parse::<u128>().is_ok_and(|option| option == value),
        _ => false
    })
}

fn text_test(subject: Subject<'_>, param: Option<&str>, test: fn(&str, &str) -> bool) -> bool {
    match (subject, param) {
        (Subject::Str(text), Some(param)) => test(text, param),
        _ => false
    }
}

/// Comparison named by a bound rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    AtLeast,
    AtMost,
    Exactly,
    Above,
    Below
}

/// Collection size as seen by [`ValidateLength`].
struct Count(u64);

impl ValidateLength<u64> for Count {
    fn length(&self) -> Option<u64> {
        Some(self.0)
    }
}

fn bound(subject: Subject<'_>, param: Option<&str>, bound: Bound) -> bool {
    let Some(param) = param else {
        return false;
    };
    match subject {
        Subject::Str(text) => length(&text, param, bound),
        Subject::Len(len) => u64::try_from(len).is_ok_and(|len| length(&Count(len), param, bound)),
        Subject::Int(value) => integer(value, param, bound),
        Subject::Uint(value) => integer(value, param, bound),
        Subject::Float(value) => param.parse().is_ok_and(|limit| range(value, limit, bound)),
        _ => false
    }
}

/// Size bound; strict bounds shift by one since sizes are whole.
fn length<V>(value: &V, param: &str, bound: Bound) -> bool
where
    V: ValidateLength<u64>
{
    let Ok(limit) = param.parse::<u64>() else {
        return false;
    };
    match bound {
        Bound::AtLeast => value.validate_length(Some(limit), None, None),
        Bound::AtMost => value.validate_length(None, Some(limit), None),
        Bound::Exactly => value.validate_length(None, None, Some(limit)),
        Bound::Above => limit
            .checked_add(1)
            .is_some_and(|min| value.validate_length(Some(min), None, None)),
        Bound::Below => limit
            .checked_sub(1)
            .is_some_and(|max| value.validate_length(None, Some(max), None))
    }
}

/// Integer subjects. The float view only serves fractional parameters.
trait Integer: Sized + Copy + FromStr + ValidateRange<Self> {
    fn as_float(self) -> f64;
}

#[allow(clippy::cast_precision_loss)]
impl Integer for i128 {
    fn as_float(self) -> f64 {
        self as f64
    }
}

#[allow(clippy::cast_precision_loss)]
impl Integer for u128 {
    fn as_float(self) -> f64 {
        self as f64
    }
}

fn integer<T>(value: T, param: &str, bound: Bound) -> bool
where
    T: Integer
{
    match param.parse::<T>() {
        Ok(limit) => range(value, limit, bound),
        Err(_) => param
            .parse::<f64>()
            .is_ok_and(|limit| range(value.as_float(), limit, bound))
    }
}

fn range<T>(value: T, limit: T, bound: Bound) -> bool
where
    T: ValidateRange<T> + Copy
{
    match bound {
        Bound::AtLeast => value.validate_range(Some(limit), None, None, None),
        Bound::AtMost => value.validate_range(None, Some(limit), None, None),
        Bound::Exactly => value.validate_range(Some(limit), Some(limit), None, None),
        Bound::Above => value.validate_range(None, None, Some(limit), None),
        Bound::Below => value.validate_range(None, None, None, Some(limit))
    }
}

fn equals(subject: Subject<'_>, param: &str) -> bool {
    match subject {
        Subject::Str(text) => text == param,
        Subject::Bool(value) => parse_bool(param).is_ok_and(|expected| expected == value),
        Subject::Int(_) | Subject::Uint(_) | Subject::Float(_) | Subject::Len(_) => {
            bound(subject, Some(param), Bound::Exactly)
        }
        _ => false
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())
}

fn is_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    match unsigned.split_once('.') {
        Some((whole, fraction)) => is_digits(whole) && is_digits(fraction),
        None => is_digits(unsigned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(name: &str, subject: Subject<'_>, param: Option<&str>) -> bool {
        let rules = builtin();
        let (_, rule) = rules
            .iter()
            .find(|(key, _)| *key == name)
            .unwrap_or_else(|| panic!("no rule {name}"));
        rule(subject, param)
    }

    #[test]
    fn parse_rule_string() {
        let specs: Vec<_> = parse("required, min=3 ,,oneof=a b").collect();
        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0], RuleSpec {
            name:  "required",
            param: None
        });
        assert_eq!(specs[1].param, Some("3"));
        assert_eq!(specs[2].display(), "oneof=a b");
    }

    #[test]
    fn number_accepts_only_digits() {
        assert!(check("number", Subject::Str("12345678901"), None));
        assert!(!check("number", Subject::Str("1234das5678901"), None));
        assert!(!check("number", Subject::Str(""), None));
        assert!(!check("number", Subject::Str("-1"), None));
        assert!(check("number", Subject::Int(-1), None));
    }

    #[test]
    fn numeric_accepts_signed_decimals() {
        assert!(check("numeric", Subject::Str("-12.5"), None));
        assert!(check("numeric", Subject::Str("+7"), None));
        assert!(!check("numeric", Subject::Str("1."), None));
        assert!(!check("numeric", Subject::Str("abc"), None));
    }

    #[test]
    fn bounds_measure_text_by_chars() {
        assert!(check("min", Subject::Str("héé"), Some("3")));
        assert!(!check("max", Subject::Str("long"), Some("3")));
        assert!(check("len", Subject::Len(2), Some("2")));
        assert!(check("gt", Subject::Int(5), Some("4")));
        assert!(!check("lt", Subject::Uint(5), Some("5")));
        assert!(check("lte", Subject::Float(5.0), Some("5")));
        assert!(!check("min", Subject::Str("x"), Some("not a number")));
        assert!(check("gt", Subject::Len(3), Some("2")));
        assert!(!check("gt", Subject::Len(2), Some("2")));
        assert!(!check("lt", Subject::Str(""), Some("0")));
        assert!(check("lt", Subject::Str("ab"), Some("3")));
    }

    #[test]
    fn large_integers_compare_exactly() {
        let big = 9_007_199_254_740_993_i128;
        assert!(!check("max", Subject::Int(big), Some("9007199254740992")));
        assert!(check("eq", Subject::Int(big), Some("9007199254740993")));
        assert!(check("ne", Subject::Uint(u128::from(u64::MAX)), Some("18446744073709551614")));
        assert!(check("lte", Subject::Uint(u128::MAX), Some("340282366920938463463374607431768211455")));
    }

    #[test]
    fn fractional_and_negative_limits_on_integers() {
        assert!(check("gt", Subject::Int(3), Some("2.5")));
        assert!(!check("lt", Subject::Int(3), Some("2.5")));
        assert!(check("min", Subject::Uint(0), Some("-1")));
        assert!(!check("max", Subject::Uint(1), Some("-1")));
    }

    #[test]
    fn equality() {
        assert!(check("eq", Subject::Str("a"), Some("a")));
        assert!(check("eq", Subject::Bool(true), Some("true")));
        assert!(check("ne", Subject::Int(3), Some("4")));
        assert!(!check("eq", Subject::Int(3), None));
    }

    #[test]
    fn oneof_options() {
        assert!(check("oneof", Subject::Str("red"), Some("red green")));
        assert!(!check("oneof", Subject::Str("blue"), Some("red green")));
        assert!(check("oneof", Subject::Int(2), Some("1 2 3")));
    }

    #[test]
    fn text_rules() {
        assert!(check("alpha", Subject::Str("abc"), None));
        assert!(!check("alpha", Subject::Str("ab1"), None));
        assert!(check("alphanum", Subject::Str("ab1"), None));
        assert!(check("contains", Subject::Str("hello"), Some("ell")));
        assert!(check("startswith", Subject::Str("hello"), Some("he")));
        assert!(!check("endswith", Subject::Str("hello"), Some("he")));
        assert!(check("lowercase", Subject::Str("abc"), None));
        assert!(!check("uppercase", Subject::Str("aBC"), None));
    }

    #[test]
    fn email_and_url() {
        assert!(check("email", Subject::Str("user@example.com"), None));
        assert!(!check("email", Subject::Str("not-an-email"), None));
        assert!(check("url", Subject::Str("https://example.com/a"), None));
        assert!(!check("url", Subject::Str("example"), None));
    }

    #[test]
    fn rules_reject_foreign_subjects() {
        assert!(!check("alpha", Subject::Int(1), None));
        assert!(!check("min", Subject::Opaque, Some("1")));
        assert!(!check("email", Subject::Absent, None));
    }
}
