// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust
//! use reqbind_core::prelude::*;
//!
//! let binder = Binder::default();
//! assert_eq!(binder.body_limit(), reqbind_core::DEFAULT_BODY_LIMIT);
//! ```

#[cfg(feature = "axum")]
pub use crate::Bound;
pub use crate::{
    BindError, Binder, Inbound, Rejection, RequestSource, Schema, Timestamp, Validation, read_body,
    resolve, valid
};
