mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::setup_test_app;
use serde_json::json;
use stockroom::repository::UserRepository;
use stockroom_core::{BcryptHasher, PasswordHasher};
use tower::ServiceExt;

fn alice() -> serde_json::Value {
    json!({
        "username": "alice",
        "email": "Alice@X.com",
        "password": "Pass123",
        "fullName": "Alice A"
    })
}

#[tokio::test]
async fn test_register_success() {
    let app = setup_test_app();

    let (status, body) = app.post("/api/auth/register", alice()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["email"], "alice@x.com");
    assert_eq!(body["fullName"], "Alice A");
    assert!(body["userId"].as_i64().is_some());
    assert!(body.get("password").is_none());

    let stored = app.store.find_by_email("alice@x.com").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "Pass123");
    assert!(BcryptHasher::new(4).verify("Pass123", &stored.password_hash).unwrap());
}

#[tokio::test]
async fn test_register_without_username() {
    let app = setup_test_app();

    let (status, _) = app
        .post(
            "/api/auth/register",
            json!({ "email": "bob@x.com", "password": "Secret9", "fullName": "Bob" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = setup_test_app();
    app.post("/api/auth/register", alice()).await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            json!({
                "username": "alice2",
                "email": "alice@x.com",
                "password": "Pass123",
                "fullName": "Alice B"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn test_register_invalid_email_writes_nothing() {
    let app = setup_test_app();

    let (status, body) = app
        .post(
            "/api/auth/register",
            json!({ "email": "not-an-email", "password": "Pass123", "fullName": "X" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email format");
    assert_eq!(app.store.write_count().await, 0);
}

#[tokio::test]
async fn test_register_weak_password() {
    let app = setup_test_app();

    let (status, body) = app
        .post(
            "/api/auth/register",
            json!({ "email": "carol@x.com", "password": "abcdefgh", "fullName": "Carol" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password must contain at least one digit");
    assert_eq!(app.store.write_count().await, 0);
}

#[tokio::test]
async fn test_register_weak_password_wins_over_duplicate_email() {
    let app = setup_test_app();
    app.post("/api/auth/register", alice()).await;

    let mut weak = alice();
    weak["username"] = json!("alice2");
    weak["password"] = json!("abcdefgh");
    let (status, body) = app.post("/api/auth/register", weak).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password must contain at least one digit");
    assert_eq!(app.store.write_count().await, 1);
}

#[tokio::test]
async fn test_register_email_too_long() {
    let app = setup_test_app();
    let mut body = alice();
    body["email"] = json!(format!("{}@x.com", "a".repeat(260)));

    let (status, error) = app.post("/api/auth/register", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Email must not exceed 255 characters");
    assert_eq!(app.store.write_count().await, 0);
}

#[tokio::test]
async fn test_register_rejects_nul_in_full_name() {
    let app = setup_test_app();
    let mut body = alice();
    body["fullName"] = json!("Al\u{0}ice");

    let (status, error) = app.post("/api/auth/register", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Full name contains invalid characters");
}

#[tokio::test]
async fn test_register_password_longer_than_bcrypt_input() {
    let app = setup_test_app();
    let mut body = alice();
    body["password"] = json!(format!("{}1", "a".repeat(79)));

    let (status, error) = app.post("/api/auth/register", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Password must not exceed 71 bytes");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = setup_test_app();

    let (_, missing_email) = app
        .post("/api/auth/register", json!({ "password": "Pass123", "fullName": "X" }))
        .await;
    let (_, missing_name) = app
        .post("/api/auth/register", json!({ "email": "x@x.com", "password": "Pass123" }))
        .await;

    assert_eq!(missing_email["message"], "Email is required");
    assert_eq!(missing_name["message"], "Full name is required");
}

#[tokio::test]
async fn test_login_success() {
    let app = setup_test_app();
    let (_, registered) = app.post("/api/auth/register", alice()).await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            json!({ "email": "alice@x.com", "password": "Pass123" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["userId"], registered["userId"]);
    assert_eq!(
        body["token"],
        format!("mock-jwt-token-{}", registered["userId"].as_i64().unwrap())
    );
}

#[tokio::test]
async fn test_login_with_username() {
    let app = setup_test_app();
    app.post("/api/auth/register", alice()).await;

    let (status, body) = app
        .post("/api/auth/login", json!({ "username": "alice", "password": "Pass123" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@x.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = setup_test_app();
    app.post("/api/auth/register", alice()).await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            json!({ "email": "alice@x.com", "password": "Wrong123" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_long_password_with_matching_prefix() {
    let app = setup_test_app();
    let mut body = alice();
    body["password"] = json!(format!("{}1", "a".repeat(70)));
    let (status, _) = app.post("/api/auth/register", body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post(
            "/api/auth/login",
            json!({ "email": "alice@x.com", "password": format!("{}2", "a".repeat(79)) }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_rejects_nul_in_username() {
    let app = setup_test_app();

    let (status, body) = app
        .post(
            "/api/auth/login",
            json!({ "username": "test\u{0}admin", "password": "Pass123" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username contains invalid characters");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = setup_test_app();

    let (status, body) = app
        .post(
            "/api/auth/login",
            json!({ "email": "nobody@x.com", "password": "Pass123" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_missing_password() {
    let app = setup_test_app();

    let (status, body) = app
        .post("/api/auth/login", json!({ "email": "alice@x.com" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password is required");
}

#[tokio::test]
async fn test_missing_content_type_is_unsupported() {
    let app = setup_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .body(Body::from(r#"{"email":"a@b.co","password":"Pass123"}"#))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = setup_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
