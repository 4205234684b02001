// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Axum extractor.
//!
//! ```rust,ignore
//! use axum::{Router, routing::post};
//! use reqbind::{Bind, Bound};
//!
//! async fn create(Bound(user): Bound<CreateUser>) -> String {
//!     user.name
//! }
//!
//! let app = Router::new().route("/users/{org}", post(create));
//! ```
//!
//! A custom [`Binder`] is picked up from an `Extension<Arc<Binder>>` layer;
//! without one the default binder is used.

use std::{
    ops::{Deref, DerefMut},
    sync::Arc
};

use axum::{
    Json,
    body::to_bytes,
    extract::{FromRequest, FromRequestParts, RawPathParams, Request},
    response::{IntoResponse, Response}
};
use serde_json::json;
use tracing::error;

use crate::{
    binder::{Binder, Rejection},
    error::BindError,
    request::Inbound,
    schema::Schema
};

/// Extracts and validates `T` from the whole request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bound<T>(pub T);

impl<T> Deref for Bound<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Bound<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<S, T> FromRequest<S> for Bound<T>
where
    S: Send + Sync,
    T: Schema + Send
{
    type Rejection = Rejection;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = request.into_parts();
        let params: Vec<(String, String)> = RawPathParams::from_request_parts(&mut parts, state)
            .await
            .map(|raw| {
                raw.iter()
                    .map(|(key, value)| (key.to_owned(), value.to_owned()))
                    .collect()
            })
            .unwrap_or_default();
        let custom = parts.extensions.get::<Arc<Binder>>().cloned();
        let binder: &Binder = match &custom {
            Some(custom) => custom.as_ref(),
            None => Binder::global()
        };
        let bytes = to_bytes(body, binder.body_limit())
            .await
            .map_err(|err| Rejection::Failed(BindError::BodyRead(err.to_string())))?;
        let inbound = Inbound::new(parts, bytes).with_path_params(params);
        binder.valid(&inbound).map(Bound)
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Invalid(validation) => {
                (status, Json(json!({ "message": validation.message() }))).into_response()
            }
            Self::Failed(err) => {
                error!(error = %err, "request binding failed");
                status.into_response()
            }
        }
    }
}
