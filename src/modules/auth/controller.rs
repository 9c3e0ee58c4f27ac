use axum::{Json, extract::State, http::StatusCode};
use stockroom_core::AppError;
use stockroom_models::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
};
use tracing::instrument;

use crate::extract::JsonBody;
use crate::state::AppState;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Validation error or duplicate email/username", body = MessageResponse),
        (status = 415, description = "Missing JSON content type", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let user = state.auth.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
            email: user.email,
            full_name: user.full_name,
        }),
    ))
}

/// Log in with email (or username) and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid credentials or validation error", body = MessageResponse),
        (status = 415, description = "Missing JSON content type", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn login_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state.auth.login(request).await?;

    let token = format!("mock-jwt-token-{}", user.id);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user_id: user.id,
        email: user.email,
        full_name: user.full_name,
        token,
    }))
}
