mod common;

use axum::http::StatusCode;
use common::setup_test_app;

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document() {
    let app = setup_test_app();

    let (status, body) = app.get("/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Stockroom API");
    assert!(body["paths"]["/api/products/{id}"].is_object());
}
