// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Priority resolution passes.
//!
//! # Pipeline
//!
//! ```text
//! CollectBody ──► ResolveSources ──► OverrideUrl ──► Validate
//!   (json keys      (query < header     (path params
//!    marked)         < url, defaults,    always win)
//!                    raw re-decode)
//! ```
//!
//! Effective priority per field: path parameter > JSON body > header >
//! query > default. A path marked by the body or by an earlier candidate is
//! never written again by a lower source; defaults never mark.

use tracing::trace;

use crate::{
    collect::{collect, url_candidate},
    descriptor::FieldDescriptor,
    error::BindError,
    explicit::ExplicitSet,
    path::FieldPath,
    request::RequestSource,
    schema::Fields,
    walk::{Visit, walk}
};

/// Per-call resolution state.
pub(crate) struct Resolution<'r, R: ?Sized> {
    request:  &'r R,
    explicit: ExplicitSet
}

impl<'r, R> Resolution<'r, R>
where
    R: RequestSource + ?Sized
{
    pub(crate) fn new(request: &'r R) -> Self {
        Self {
            request,
            explicit: ExplicitSet::new()
        }
    }

    pub(crate) fn explicit_mut(&mut self) -> &mut ExplicitSet {
        &mut self.explicit
    }

    /// Query, header, path parameter and default for every leaf, followed
    /// by raw re-decoding.
    pub(crate) fn resolve_sources(&mut self, target: &mut dyn Fields) -> Result<(), BindError> {
        walk(target, &FieldPath::root(), self)
    }

    /// Second walk applying path parameters unconditionally.
    pub(crate) fn override_url(&mut self, target: &mut dyn Fields) -> Result<(), BindError> {
        walk(target, &FieldPath::root(), &mut UrlOverride {
            request: self.request
        })
    }
}

impl<R> Visit for Resolution<'_, R>
where
    R: RequestSource + ?Sized
{
    fn leaf(
        &mut self,
        target: &mut dyn Fields,
        index: usize,
        field: &FieldDescriptor,
        path: &FieldPath
    ) -> Result<(), BindError> {
        if self.explicit.contains(path.as_str()) {
            trace!(path = %path, "already explicit, lower sources skipped");
        } else if let Some(candidate) = collect(self.request, field) {
            assign(target, index, candidate.value, path)?;
            trace!(path = %path, source = candidate.source.label(), "resolved");
            self.explicit.mark(path.clone());
        } else if let Some(literal) = field.default_literal() {
            assign(target, index, literal, path)?;
            trace!(path = %path, "default applied");
        }

        if let Some(companion) = field.raw_companion() {
            let replaced =
                target
                    .redecode(index)
                    .map_err(|source| BindError::RawDocument {
                        path: path.clone(),
                        companion,
                        source
                    })?;
            trace!(path = %path, companion, replaced, "raw companion checked");
        }
        Ok(())
    }
}

struct UrlOverride<'r, R: ?Sized> {
    request: &'r R
}

impl<R> Visit for UrlOverride<'_, R>
where
    R: RequestSource + ?Sized
{
    fn leaf(
        &mut self,
        target: &mut dyn Fields,
        index: usize,
        field: &FieldDescriptor,
        path: &FieldPath
    ) -> Result<(), BindError> {
        if let Some(candidate) = url_candidate(self.request, field) {
            assign(target, index, candidate.value, path)?;
            trace!(path = %path, "path parameter override");
        }
        Ok(())
    }
}

fn assign(
    target: &mut dyn Fields,
    index: usize,
    raw: &str,
    path: &FieldPath
) -> Result<(), BindError> {
    target
        .assign(index, raw)
        .map_err(|source| BindError::Coerce {
            path: path.clone(),
            source
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::CoerceError,
        request::Inbound,
        schema::fixtures::Search
    };

    fn run(request: &Inbound, value: &mut Search, explicit: &[&str]) -> Result<(), BindError> {
        let mut resolution = Resolution::new(request);
        for path in explicit {
            resolution.explicit_mut().mark(FieldPath::from(*path));
        }
        resolution.resolve_sources(value)?;
        resolution.override_url(value)
    }

    #[test]
    fn query_header_and_defaults() {
        let request = Inbound::builder()
            .uri("/?q=from-query&size=5")
            .header("X-Term", "from-header")
            .build()
            .unwrap();
        let mut value = Search::default();
        run(&request, &mut value, &[]).unwrap();
        assert_eq!(value.term, "from-header");
        assert!(value.verbose);
        assert_eq!(value.page.size, 5);
        assert_eq!(value.next.as_ref().map(|next| next.size), Some(5));
    }

    #[test]
    fn explicit_paths_keep_their_value() {
        let request = Inbound::builder()
            .uri("/?verbose=true&size=9")
            .build()
            .unwrap();
        let mut value = Search::default();
        value.page.size = 0;
        run(&request, &mut value, &["verbose", "page.size"]).unwrap();
        assert!(!value.verbose);
        assert_eq!(value.page.size, 0);
        assert_eq!(value.next.map(|next| next.size), Some(9));
    }

    #[test]
    fn defaults_do_not_mark() {
        let request = Inbound::builder().uri("/").build().unwrap();
        let mut resolution = Resolution::new(&request);
        let mut value = Search::default();
        resolution.resolve_sources(&mut value).unwrap();
        assert!(value.verbose);
        assert!(!resolution.explicit_mut().contains("verbose"));
    }

    #[test]
    fn url_overrides_body_value() {
        let request = Inbound::builder().uri("/").path_param("id", "77").build().unwrap();
        let mut value = Search {
            id: 5,
            ..Search::default()
        };
        run(&request, &mut value, &["id"]).unwrap();
        assert_eq!(value.id, 77);
    }

    #[test]
    fn raw_companion_fills_zero_target() {
        let request = Inbound::builder()
            .uri("/?tags=%5B%22a%22%2C%22b%22%5D")
            .build()
            .unwrap();
        let mut value = Search::default();
        run(&request, &mut value, &[]).unwrap();
        assert_eq!(value.tags, ["a", "b"]);
    }

    #[test]
    fn raw_companion_skips_populated_target() {
        let request = Inbound::builder().uri("/?tags=%5B%22a%22%5D").build().unwrap();
        let mut value = Search {
            tags: vec!["kept".into()],
            ..Search::default()
        };
        run(&request, &mut value, &[]).unwrap();
        assert_eq!(value.tags, ["kept"]);
    }

    #[test]
    fn invalid_raw_companion_is_a_hard_error() {
        let request = Inbound::builder().uri("/?tags=%7Bnope").build().unwrap();
        let err = run(&request, &mut Search::default(), &[]).unwrap_err();
        assert!(matches!(err, BindError::RawDocument { companion: "tags_json", .. }));
    }

    #[test]
    fn coercion_failure_carries_path() {
        let request = Inbound::builder().uri("/?size=big").build().unwrap();
        let err = run(&request, &mut Search::default(), &[]).unwrap_err();
        match err {
            BindError::Coerce {
                path,
                source: CoerceError::Integer { .. }
            } => assert_eq!(path.as_str(), "page.size"),
            other => panic!("unexpected {other:?}")
        }
    }

    #[test]
    fn empty_url_value_does_not_override() {
        let request = Inbound::builder().uri("/").path_param("id", "").build().unwrap();
        let mut value = Search {
            id: 3,
            ..Search::default()
        };
        run(&request, &mut value, &["id"]).unwrap();
        assert_eq!(value.id, 3);
    }
}
