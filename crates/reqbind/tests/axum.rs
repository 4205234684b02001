// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Axum extractor integration tests.
//!
//! Run with: `cargo test --features axum -p reqbind --test axum`

#![cfg(feature = "axum")]

use std::sync::Arc;

use axum::{
    Extension, Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    routing::post
};
use reqbind::{Bind, Binder, Bound, Subject};
use serde::Deserialize;
use tower::ServiceExt;

#[derive(Debug, Default, Deserialize, Bind)]
#[serde(default)]
struct CreateItem {
    #[bind(url = "org", rules = "required")]
    org: i64,

    #[bind(rules = "required,min=2")]
    name: String,

    #[bind(header = "X-Priority", default = "1", rules = "even")]
    priority: u8
}

async fn create(Bound(item): Bound<CreateItem>) -> String {
    format!("{}:{}:{}", item.org, item.name, item.priority)
}

fn app() -> Router {
    let binder = Binder::builder()
        .rule("even", |subject, _| matches!(subject, Subject::Uint(n) if n % 2 == 0))
        .build();
    Router::new()
        .route("/orgs/{org}/items", post(create))
        .layer(Extension(Arc::new(binder)))
}

fn request(body: &str, priority: Option<&str>) -> Request<Body> {
    let mut builder = Request::post("/orgs/9/items").header("content-type", "application/json");
    if let Some(priority) = priority {
        builder = builder.header("X-Priority", priority);
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

async fn read(response: axum::response::Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn binds_path_body_and_header() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let response = app()
        .oneshot(request(r#"{"name":"lamp","org":1}"#, Some("4")))
        .await
        .unwrap();
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "9:lamp:4");
}

#[tokio::test]
async fn validation_failure_is_bad_request() {
    let response = app()
        .oneshot(request(r#"{"name":"x"}"#, Some("4")))
        .await
        .unwrap();
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["message"], "json name failed 'min=2' validation");
}

#[tokio::test]
async fn default_applies_before_custom_rule() {
    let response = app()
        .oneshot(request(r#"{"name":"lamp"}"#, None))
        .await
        .unwrap();
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("header X-Priority failed 'even' validation"));
}

#[tokio::test]
async fn malformed_body_is_server_error() {
    let response = app().oneshot(request("{", Some("2"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn without_extension_the_default_binder_is_used() {
    let app = Router::new().route("/orgs/{org}/items", post(create));
    let response = app.oneshot(request(r#"{"name":"lamp"}"#, Some("2"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
