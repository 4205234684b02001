// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Candidate collection from non-body sources.
//!
//! For one field, each configured source is consulted in rising priority and
//! a later hit replaces an earlier one:
//!
//! ```text
//! query  <  header  <  path parameter
//! ```
//!
//! Empty values count as absent everywhere.

use crate::{
    descriptor::{FieldDescriptor, SourceKind},
    request::RequestSource
};

/// Raw value found for a field, tagged with its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'r> {
    /// Value as received.
    pub value:  &'r str,
    /// Where it came from.
    pub source: SourceKind
}

/// Highest-priority non-empty candidate for a field.
pub fn collect<'r, R>(request: &'r R, field: &FieldDescriptor) -> Option<Candidate<'r>>
where
    R: RequestSource + ?Sized
{
    let query = field
        .query_key()
        .and_then(|key| present(request.query(key)))
        .map(|value| Candidate {
            value,
            source: SourceKind::Query
        });
    let header = field
        .header_key()
        .and_then(|name| present(request.header(name)))
        .map(|value| Candidate {
            value,
            source: SourceKind::Header
        });
    url_candidate(request, field).or(header).or(query)
}

/// Path-parameter candidate alone, used by the override pass.
pub fn url_candidate<'r, R>(request: &'r R, field: &FieldDescriptor) -> Option<Candidate<'r>>
where
    R: RequestSource + ?Sized
{
    field
        .url_key()
        .and_then(|key| present(request.path_param(key)))
        .map(|value| Candidate {
            value,
            source: SourceKind::Url
        })
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
