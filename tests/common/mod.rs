use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use stockroom::repository::MemoryStore;
use stockroom::router::init_router;
use stockroom::state::AppState;
use stockroom_config::{CorsConfig, ValidationPolicy};
use stockroom_core::BcryptHasher;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    /// Shares data with the store behind `router`.
    pub store: MemoryStore,
}

/// Router over a fresh in-memory store with a cheap bcrypt cost.
pub fn setup_test_app() -> TestApp {
    let store = MemoryStore::new();
    let state = AppState::new(
        store.clone(),
        Arc::new(BcryptHasher::new(4)),
        ValidationPolicy::default(),
        CorsConfig::default(),
    );

    TestApp {
        router: init_router(state),
        store,
    }
}

impl TestApp {
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    #[allow(dead_code)]
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    #[allow(dead_code)]
    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body)).await
    }

    #[allow(dead_code)]
    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, Some(body)).await
    }

    #[allow(dead_code)]
    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, None).await
    }
}
