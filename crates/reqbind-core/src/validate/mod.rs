// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Validation engine.
//!
//! Runs after binding, never mutates the value, and reports failures as
//! data. Rules come from each field's rule string; see [`rules`] for the
//! built-in set.
//!
//! # Architecture
//!
//! ```text
//! validate/
//! ├── mod.rs      - Validator, Validation, Violation
//! ├── rules.rs    - rule-string parsing and built-in rules
//! └── subject.rs  - Subject / Inspect value view
//! ```
//!
//! # Messages
//!
//! | Failure | Message |
//! |---------|---------|
//! | `required` | `<kind> <key> is required` |
//! | any other rule | `<kind> <key> failed '<rule>' validation` |
//!
//! `<kind>` and `<key>` come from
//! [`FieldDescriptor::message_source`]. Messages of all violations are
//! joined with `,` in declaration order, nested fields depth-first. Each
//! field reports at most its first failing rule.

pub mod rules;
mod subject;

use std::{borrow::Cow, collections::HashMap, fmt, sync::Arc};

use tracing::debug;
use validator::ValidationError;

pub use self::{
    rules::{RuleFn, RuleSpec},
    subject::{Inspect, Inspected, Subject}
};
use crate::{descriptor::FieldDescriptor, error::BindError, path::FieldPath, schema::Fields};

/// Immutable rule registry.
#[derive(Clone)]
pub struct Validator {
    rules: HashMap<&'static str, Arc<RuleFn>>
}

impl Validator {
    /// Start from the built-in rules.
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder {
            rules: rules::builtin().into_iter().collect()
        }
    }

    /// Whether a rule name is known.
    #[must_use]
    pub fn knows(&self, name: &str) -> bool {
        name == rules::REQUIRED || name == rules::OMITEMPTY || self.rules.contains_key(name)
    }

    /// Validate a bound value and everything nested below it.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::UnknownRule`] when a rule string names a rule
    /// that is not registered.
    pub fn validate(&self, value: &dyn Fields) -> Result<Validation, BindError> {
        let mut violations = Vec::new();
        self.visit(value, &FieldPath::root(), &mut violations)?;
        if !violations.is_empty() {
            debug!(violations = violations.len(), "validation failed");
        }
        Ok(Validation::from_violations(violations))
    }

    fn visit(
        &self,
        value: &dyn Fields,
        prefix: &FieldPath,
        violations: &mut Vec<Violation>
    ) -> Result<(), BindError> {
        for (index, field) in value.descriptors().iter().enumerate() {
            let path = prefix.child(field.name());
            if let Some(inspected) = value.inspect(index) {
                self.check(field, inspected, &path, violations)?;
            }
            if field.kind().children().is_some()
                && let Some(inner) = value.nested(index)
            {
                self.visit(inner, &path, violations)?;
            }
        }
        Ok(())
    }

    fn check(
        &self,
        field: &FieldDescriptor,
        inspected: Inspected<'_>,
        path: &FieldPath,
        violations: &mut Vec<Violation>
    ) -> Result<(), BindError> {
        let Some(rule_list) = field.rule_list() else {
            return Ok(());
        };
        let specs: Vec<RuleSpec<'_>> = rules::parse(rule_list).collect();
        if let Some(unknown) = specs.iter().find(|spec| !self.knows(spec.name)) {
            return Err(BindError::UnknownRule {
                path: path.clone(),
                rule: unknown.name.to_owned()
            });
        }
        let skippable = specs.iter().any(|spec| spec.name == rules::OMITEMPTY);
        if skippable && inspected.is_empty() {
            return Ok(());
        }
        for spec in &specs {
            let (code, passed) = match spec.name {
                rules::REQUIRED => (rules::REQUIRED, !inspected.is_empty()),
                rules::OMITEMPTY => continue,
                name => {
                    let Some((&code, rule)) = self.rules.get_key_value(name) else {
                        continue;
                    };
                    let subject = inspected.subject();
                    let passed = subject != Subject::Absent && rule(subject, spec.param);
                    (code, passed)
                }
            };
            if !passed {
                violations.push(Violation::new(field, path.clone(), code, spec));
                break;
            }
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.rules.keys().copied().collect();
        names.sort_unstable();
        f.debug_struct("Validator").field("rules", &names).finish()
    }
}

/// Builder for [`Validator`].
pub struct ValidatorBuilder {
    rules: HashMap<&'static str, Arc<RuleFn>>
}

impl ValidatorBuilder {
    /// Register a rule, replacing any built-in of the same name.
    ///
    /// ```rust
    /// use reqbind_core::{Subject, Validator};
    ///
    /// let validator = Validator::builder()
    ///     .rule("even", |subject, _| matches!(subject, Subject::Int(n) if n % 2 == 0))
    ///     .build();
    /// assert!(validator.knows("even"));
    /// ```
    #[must_use]
    pub fn rule<F>(mut self, name: &'static str, check: F) -> Self
    where
        F: Fn(Subject<'_>, Option<&str>) -> bool + Send + Sync + 'static
    {
        let (name, check) = rules::entry(name, check);
        self.rules.insert(name, check);
        self
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> Validator {
        Validator {
            rules: self.rules
        }
    }
}

impl fmt::Debug for ValidatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// One failed rule on one field.
#[derive(Debug, Clone)]
pub struct Violation {
    path:    FieldPath,
    message: String,
    error:   ValidationError
}

impl Violation {
    fn new(field: &FieldDescriptor, path: FieldPath, code: &'static str, spec: &RuleSpec<'_>) -> Self {
        let (kind, key) = field.message_source();
        let message = if code == rules::REQUIRED {
            format!("{} {key} is required", kind.label())
        } else {
            format!("{} {key} failed '{}' validation", kind.label(), spec.display())
        };
        let mut error = ValidationError::new(code).with_message(Cow::Owned(message.clone()));
        if let Some(param) = spec.param {
            error.add_param(Cow::Borrowed("param"), &param);
        }
        error.add_param(Cow::Borrowed("field"), &path.as_str());
        Self {
            path,
            message,
            error
        }
    }

    /// Field that failed.
    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Rule name, e.g. `required` or `min`.
    #[must_use]
    pub fn rule(&self) -> &str {
        &self.error.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured form, compatible with the `validator` crate.
    #[must_use]
    pub const fn error(&self) -> &ValidationError {
        &self.error
    }
}

/// Outcome of validating one bound value.
#[derive(Debug, Clone, Default)]
pub struct Validation {
    violations: Vec<Violation>,
    message:    String
}

impl Validation {
    fn from_violations(violations: Vec<Violation>) -> Self {
        let message = violations
            .iter()
            .map(Violation::message)
            .collect::<Vec<_>>()
            .join(",");
        Self {
            violations,
            message
        }
    }

    /// Whether every rule passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// All violation messages joined with `,`. Empty when valid.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Individual violations in report order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
