use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use stockroom_core::AppError;
use stockroom_models::{MessageResponse, ProductRequest, ProductResponse, ProductSearchParams};
use tracing::instrument;

use crate::extract::{JsonBody, PathParam};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (status = 400, description = "Validation error, duplicate name or unknown category", body = MessageResponse),
        (status = 415, description = "Missing JSON content type", body = MessageResponse)
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let product = state.products.create(request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// List products, optionally filtered by name
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductSearchParams),
    responses(
        (status = 200, description = "Products ordered by id", body = Vec<ProductResponse>)
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
    Query(params): Query<ProductSearchParams>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = match params.term() {
        Some(term) => state.products.search(term).await?,
        None => state.products.list().await?,
    };
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/search",
    params(ProductSearchParams),
    responses(
        (status = 200, description = "Products whose name contains the keyword", body = Vec<ProductResponse>)
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<ProductSearchParams>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.products.search(params.term().unwrap_or_default()).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 404, description = "Product not found", body = MessageResponse)
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn get_product_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.products.get_by_id(id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 400, description = "Validation error, duplicate name or unknown category", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse),
        (status = 415, description = "Missing JSON content type", body = MessageResponse)
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn update_product(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(request): JsonBody<ProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.products.update(id, request).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 404, description = "Product not found", body = MessageResponse)
    ),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, AppError> {
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
