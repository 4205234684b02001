// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Binding entry points and run-time configuration.
//!
//! [`Binder`] is immutable once built and is shared freely across requests.
//! The free functions [`resolve`], [`valid`] and [`read_body`] use a
//! process-wide default instance.
//!
//! # Example
//!
//! ```rust,ignore
//! use reqbind::{Bind, Binder, Inbound, Subject};
//!
//! let binder = Binder::builder()
//!     .rule("even", |subject, _| matches!(subject, Subject::Int(n) if n % 2 == 0))
//!     .build();
//!
//! match binder.valid::<CreateUser, _>(&inbound) {
//!     Ok(user) => { /* handle */ }
//!     Err(rejection) => return (rejection.status(), rejection.to_string())
//! }
//! ```

use std::sync::OnceLock;

use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::{
    body,
    error::BindError,
    request::RequestSource,
    resolve::Resolution,
    schema::Schema,
    validate::{Subject, Validation, Validator, ValidatorBuilder}
};

/// Default body limit for transport adapters: 2 MiB.
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Configured binding engine.
#[derive(Debug, Clone)]
pub struct Binder {
    validator:  Validator,
    bodyless:   Vec<Method>,
    body_limit: usize
}

impl Binder {
    /// Start configuring a binder.
    #[must_use]
    pub fn builder() -> BinderBuilder {
        BinderBuilder {
            validator:  Validator::builder(),
            bodyless:   vec![Method::GET],
            body_limit: DEFAULT_BODY_LIMIT
        }
    }

    /// Shared default instance used by the free functions.
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<Binder> = OnceLock::new();
        GLOBAL.get_or_init(Self::default)
    }

    /// Rule registry.
    #[must_use]
    pub const fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Maximum body size transport adapters should buffer.
    #[must_use]
    pub const fn body_limit(&self) -> usize {
        self.body_limit
    }

    /// Whether the body of this request is decoded.
    ///
    /// Skipped for bodyless methods, multipart content and empty bodies.
    pub fn reads_body<R>(&self, request: &R) -> bool
    where
        R: RequestSource + ?Sized
    {
        !self.bodyless.contains(request.method())
            && !request
                .content_type()
                .is_some_and(|content_type| content_type.contains("multipart/form-data"))
            && !request.body().is_empty()
    }

    /// Bind a request to `T` and validate the result.
    ///
    /// Validation failures are returned inside [`Validation`], not as
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] for malformed bodies, coercion failures,
    /// invalid raw companions and unknown rule names.
    #[tracing::instrument(level = "debug", skip_all, fields(method = %request.method()))]
    pub fn resolve<T, R>(&self, request: &R) -> Result<(T, Validation), BindError>
    where
        T: Schema,
        R: RequestSource + ?Sized
    {
        let mut resolution = Resolution::new(request);
        let reads_body = self.reads_body(request);
        debug!(reads_body, "binding request");
        let mut value = if reads_body {
            body::decode::<T>(request.body(), resolution.explicit_mut())?
        } else {
            T::default()
        };
        resolution.resolve_sources(&mut value)?;
        resolution.override_url(&mut value)?;
        let validation = self.validator.validate(&value)?;
        Ok((value, validation))
    }

    /// Bind and validate, collapsing both failure kinds into [`Rejection`].
    ///
    /// # Errors
    ///
    /// [`Rejection::Invalid`] when validation fails, [`Rejection::Failed`]
    /// when binding aborts.
    pub fn valid<T, R>(&self, request: &R) -> Result<T, Rejection>
    where
        T: Schema,
        R: RequestSource + ?Sized
    {
        let (value, validation) = self.resolve(request)?;
        if validation.is_valid() {
            Ok(value)
        } else {
            Err(Rejection::Invalid(validation))
        }
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`Binder`].
#[derive(Debug)]
pub struct BinderBuilder {
    validator:  ValidatorBuilder,
    bodyless:   Vec<Method>,
    body_limit: usize
}

impl BinderBuilder {
    /// Register a custom validation rule.
    #[must_use]
    pub fn rule<F>(mut self, name: &'static str, check: F) -> Self
    where
        F: Fn(Subject<'_>, Option<&str>) -> bool + Send + Sync + 'static
    {
        self.validator = self.validator.rule(name, check);
        self
    }

    /// Also skip the body for this method.
    #[must_use]
    pub fn bodyless_method(mut self, method: Method) -> Self {
        if !self.bodyless.contains(&method) {
            self.bodyless.push(method);
        }
        self
    }

    /// Maximum body size for transport adapters.
    #[must_use]
    pub const fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> Binder {
        Binder {
            validator:  self.validator.build(),
            bodyless:   self.bodyless,
            body_limit: self.body_limit
        }
    }
}

/// Why a request was not accepted.
#[derive(Debug, Error)]
pub enum Rejection {
    /// Bound value failed validation. Client error.
    #[error("{0}")]
    Invalid(Validation),

    /// Binding aborted. Server-side or malformed input.
    #[error(transparent)]
    Failed(#[from] BindError)
}

impl Rejection {
    /// HTTP status for this rejection: 400 or 500.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Validation outcome, for [`Rejection::Invalid`].
    #[must_use]
    pub const fn validation(&self) -> Option<&Validation> {
        match self {
            Self::Invalid(validation) => Some(validation),
            Self::Failed(_) => None
        }
    }
}

/// [`Binder::resolve`] on the default binder.
///
/// # Errors
///
/// See [`Binder::resolve`].
pub fn resolve<T, R>(request: &R) -> Result<(T, Validation), BindError>
where
    T: Schema,
    R: RequestSource + ?Sized
{
    Binder::global().resolve(request)
}

/// [`Binder::valid`] on the default binder.
///
/// # Errors
///
/// See [`Binder::valid`].
pub fn valid<T, R>(request: &R) -> Result<T, Rejection>
where
    T: Schema,
    R: RequestSource + ?Sized
{
    Binder::global().valid(request)
}

/// Decode the body as JSON into any deserializable type.
///
/// No sources, defaults or validation are involved. The body is borrowed,
/// so it can still be read afterwards.
///
/// # Errors
///
/// Returns [`BindError::Body`] for malformed JSON or a shape mismatch.
pub fn read_body<T, R>(request: &R) -> Result<T, BindError>
where
    T: DeserializeOwned,
    R: RequestSource + ?Sized
{
    serde_json::from_slice(request.body()).map_err(BindError::Body)
}
