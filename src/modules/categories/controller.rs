use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use stockroom_core::AppError;
use stockroom_models::{CategoryRequest, CategoryResponse, MessageResponse};
use tracing::instrument;

use crate::extract::{JsonBody, PathParam};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 400, description = "Validation error or duplicate name", body = MessageResponse),
        (status = 415, description = "Missing JSON content type", body = MessageResponse)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    let category = state.categories.create(request).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories ordered by id", body = Vec<CategoryResponse>)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = state.categories.list().await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category details", body = CategoryResponse),
        (status = 404, description = "Category not found", body = MessageResponse)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_category_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = state.categories.get_by_id(id).await?;
    Ok(Json(category))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated successfully", body = CategoryResponse),
        (status = 400, description = "Validation error or duplicate name", body = MessageResponse),
        (status = 404, description = "Category not found", body = MessageResponse)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn update_category(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(request): JsonBody<CategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = state.categories.update(id, request).await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted successfully"),
        (status = 404, description = "Category not found", body = MessageResponse)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, AppError> {
    state.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
