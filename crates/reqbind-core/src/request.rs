// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Request abstraction consumed by the binder.
//!
//! The binder reads a request through [`RequestSource`] only, so any HTTP
//! stack can feed it. [`Inbound`] is the provided implementation over the
//! `http` crate types with a fully buffered body.
//!
//! ```rust
//! use reqbind_core::{Inbound, RequestSource};
//!
//! let request = Inbound::builder()
//!     .uri("/users/42?page=2")
//!     .header("X-Token", "abc")
//!     .path_param("id", "42")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(request.query("page"), Some("2"));
//! assert_eq!(request.header("x-token"), Some("abc"));
//! assert_eq!(request.path_param("id"), Some("42"));
//! ```

use bytes::Bytes;
use http::{HeaderMap, Method, Request, header::CONTENT_TYPE, request::Parts};
use tracing::trace;

/// Read-only view of an incoming request.
pub trait RequestSource {
    /// HTTP method.
    fn method(&self) -> &Method;

    /// First value of a query-string parameter.
    fn query(&self, key: &str) -> Option<&str>;

    /// First value of a header, case-insensitive. Non-UTF-8 values read as
    /// absent.
    fn header(&self, name: &str) -> Option<&str>;

    /// Router path parameter.
    fn path_param(&self, key: &str) -> Option<&str>;

    /// Buffered body bytes.
    fn body(&self) -> &[u8];

    /// `Content-Type` header.
    fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE.as_str())
    }
}

/// Buffered request built from `http` parts.
#[derive(Debug, Clone)]
pub struct Inbound {
    method:  Method,
    headers: HeaderMap,
    query:   Vec<(String, String)>,
    params:  Vec<(String, String)>,
    body:    Bytes
}

impl Inbound {
    /// Build from request parts and a collected body.
    ///
    /// The query string is percent-decoded once here. Path parameters start
    /// empty; supply them with [`with_path_params`](Self::with_path_params).
    #[must_use]
    pub fn new(parts: Parts, body: Bytes) -> Self {
        let query = parts.uri.query().map(parse_query).unwrap_or_default();
        Self {
            method: parts.method,
            headers: parts.headers,
            query,
            params: Vec::new(),
            body
        }
    }

    /// Build from a complete request.
    #[must_use]
    pub fn from_request(request: Request<Bytes>) -> Self {
        let (parts, body) = request.into_parts();
        Self::new(parts, body)
    }

    /// Attach router path parameters.
    #[must_use]
    pub fn with_path_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>
    {
        self.params
            .extend(params.into_iter().map(|(key, value)| (key.into(), value.into())));
        self
    }

    /// Start building a request by hand.
    #[must_use]
    pub fn builder() -> InboundBuilder {
        InboundBuilder::default()
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl RequestSource for Inbound {
    fn method(&self) -> &Method {
        &self.method
    }

    fn query(&self, key: &str) -> Option<&str> {
        lookup(&self.query, key)
    }

    fn header(&self, name: &str) -> Option<&str> {
        let value = self.headers.get(name)?;
        match value.to_str() {
            Ok(text) => Some(text),
            Err(_) => {
                trace!(header = name, bytes = value.len(), "non-UTF-8 header value read as absent");
                None
            }
        }
    }

    fn path_param(&self, key: &str) -> Option<&str> {
        lookup(&self.params, key)
    }

    fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Builder for [`Inbound`], mainly for tests and non-`http` integrations.
#[derive(Debug, Default)]
pub struct InboundBuilder {
    inner:  http::request::Builder,
    params: Vec<(String, String)>,
    body:   Bytes
}

impl InboundBuilder {
    /// Set the method. Defaults to `GET`.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.inner = self.inner.method(method);
        self
    }

    /// Set the URI, including any query string.
    #[must_use]
    pub fn uri(mut self, uri: &str) -> Self {
        self.inner = self.inner.uri(uri);
        self
    }

    /// Append a header.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.inner = self.inner.header(name, value);
        self
    }

    /// Add a router path parameter.
    #[must_use]
    pub fn path_param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Set the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Set a JSON body along with its content type.
    #[must_use]
    pub fn json(self, body: &str) -> Self {
        self.header(CONTENT_TYPE.as_str(), "application/json")
            .body(Bytes::copy_from_slice(body.as_bytes()))
    }

    /// Finish.
    ///
    /// # Errors
    ///
    /// Returns the first invalid method, URI or header given to the builder.
    pub fn build(self) -> Result<Inbound, http::Error> {
        let request = self.inner.body(self.body)?;
        Ok(Inbound::from_request(request).with_path_params(self.params))
    }
}

fn parse_query(raw: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect()
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_percent_decoded() {
        let request = Inbound::builder()
            .uri("/search?q=hello%20world&tag=a+b")
            .build()
            .unwrap();
        assert_eq!(request.query("q"), Some("hello world"));
        assert_eq!(request.query("tag"), Some("a b"));
        assert_eq!(request.query("missing"), None);
    }

    #[test]
    fn first_query_value_wins() {
        let request = Inbound::builder().uri("/?a=1&a=2").build().unwrap();
        assert_eq!(request.query("a"), Some("1"));
    }

    #[test]
    fn headers_are_case_insensitive() {
        let request = Inbound::builder()
            .uri("/")
            .header("X-Request-Id", "r-1")
            .build()
            .unwrap();
        assert_eq!(request.header("x-request-id"), Some("r-1"));
        assert_eq!(request.header("X-REQUEST-ID"), Some("r-1"));
    }

    #[test]
    fn invalid_header_name_reads_as_absent() {
        let request = Inbound::builder().uri("/").build().unwrap();
        assert_eq!(request.header("bad header"), None);
    }

    #[test]
    fn non_utf8_header_value_reads_as_absent() {
        let request = Request::builder()
            .uri("/")
            .header("X-Device", http::HeaderValue::from_bytes(b"caf\xe9").unwrap())
            .body(Bytes::new())
            .unwrap();
        let inbound = Inbound::from_request(request);
        assert!(inbound.headers().contains_key("x-device"));
        assert_eq!(inbound.header("X-Device"), None);
    }

    #[test]
    fn json_sets_content_type() {
        let request = Inbound::builder()
            .method(Method::POST)
            .uri("/")
            .json(r#"{"a":1}"#)
            .build()
            .unwrap();
        assert_eq!(request.content_type(), Some("application/json"));
        assert_eq!(request.body(), br#"{"a":1}"#);
        assert_eq!(*request.method(), Method::POST);
    }

    #[test]
    fn default_method_is_get() {
        let request = Inbound::builder().uri("/").build().unwrap();
        assert_eq!(*request.method(), Method::GET);
    }

    #[test]
    fn from_http_request() {
        let request = Request::builder()
            .uri("/items?limit=5")
            .body(Bytes::new())
            .unwrap();
        let inbound = Inbound::from_request(request).with_path_params([("id", "7")]);
        assert_eq!(inbound.query("limit"), Some("5"));
        assert_eq!(inbound.path_param("id"), Some("7"));
    }

    #[test]
    fn invalid_uri_fails_build() {
        assert!(Inbound::builder().uri("not a uri").build().is_err());
    }
}
