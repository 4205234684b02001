// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime engine for reqbind.
//!
//! Binds one HTTP request to a typed value from five sources and validates
//! the result. Generated code from `reqbind-derive-impl` targets the traits
//! in this crate; they can also be implemented by hand.
//!
//! # Overview
//!
//! - [`Schema`] / [`Fields`]: static descriptor table and per-field access
//! - [`FieldDescriptor`]: source bindings, default, recursion, raw companion,
//!   rules
//! - [`Binder`]: configured engine; [`resolve`], [`valid`], [`read_body`]
//!   use a shared default
//! - [`RequestSource`] / [`Inbound`]: request abstraction over `http`
//! - [`Validator`] / [`Validation`]: rule registry and outcome
//! - [`Timestamp`]: lenient date-time parsing
//! - `Bound<T>` (feature `axum`): extractor
//!
//! # Priority
//!
//! ```text
//! path parameter  >  JSON body  >  header  >  query  >  default
//! ```
//!
//! JSON body keys count as set whenever present, even with a zero value.
//! Query, header and path values count as absent when empty.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs, rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod binder;
mod body;
pub mod coerce;
pub mod collect;
pub mod descriptor;
pub mod error;
pub mod explicit;
#[cfg(feature = "axum")]
#[cfg_attr(docsrs, doc(cfg(feature = "axum")))]
mod extract;
pub mod path;
pub mod prelude;
pub mod raw;
pub mod request;
mod resolve;
pub mod schema;
pub mod timestamp;
pub mod validate;
pub mod walk;

pub use binder::{Binder, BinderBuilder, DEFAULT_BODY_LIMIT, Rejection, read_body, resolve, valid};
pub use body::mark_json_keys;
pub use coerce::Coerce;
pub use descriptor::{FieldDescriptor, FieldKind, SourceKind};
pub use error::{BindError, CoerceError};
pub use explicit::ExplicitSet;
#[cfg(feature = "axum")]
pub use extract::Bound;
pub use path::FieldPath;
pub use raw::{RawText, ZeroValue};
pub use request::{Inbound, InboundBuilder, RequestSource};
pub use schema::{Fields, Schema};
pub use timestamp::Timestamp;
pub use validate::{Inspect, Inspected, Subject, Validation, Validator, ValidatorBuilder, Violation};
