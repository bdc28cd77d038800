//! Router-level test harness: in-memory store and export sink behind the
//! real router, plus request helpers.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::issue_token;
use crate::config::Config;
use crate::export::memory::MemoryExportSink;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::memory::MemoryResumeStore;

pub const TEST_SECRET: &str = "test-secret";

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/vitae_test".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        s3_bucket: "vitae-exports".to_string(),
        s3_endpoint: "http://localhost:9000".to_string(),
        s3_region: "us-east-1".to_string(),
        aws_access_key_id: "minio".to_string(),
        aws_secret_access_key: "minio123".to_string(),
        port: 8080,
        rust_log: "debug".to_string(),
    }
}

pub struct TestApp {
    pub store: Arc<MemoryResumeStore>,
    pub exports: Arc<MemoryExportSink>,
    state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryResumeStore::default());
        let exports = Arc::new(MemoryExportSink::default());
        let state = AppState {
            store: store.clone(),
            exports: exports.clone(),
            config: test_config(),
        };
        Self {
            store,
            exports,
            state,
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Session token for `subject` with email `<subject>@example.com`.
    pub fn token(&self, subject: &str) -> String {
        issue_token(
            TEST_SECRET,
            subject,
            &format!("{subject}@example.com"),
            None,
            Duration::hours(1),
        )
        .unwrap()
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        send(&self.router(), "GET", uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        send(&self.router(), "POST", uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        send(&self.router(), "PUT", uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        send(&self.router(), "DELETE", uri, Some(token), None).await
    }
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends a request and parses the response body as JSON (`Null` if empty).
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request(method, uri, token, body))
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Sends a bodiless request and returns status, content type and raw body.
pub async fn send_raw(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
) -> (StatusCode, String, String) {
    let response = router
        .clone()
        .oneshot(request(method, uri, token, None))
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}
