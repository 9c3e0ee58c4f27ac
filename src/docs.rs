use utoipa::OpenApi;

use stockroom_models::{
    CategoryLabel, CategoryRequest, CategoryResponse, CategorySummary, LoginRequest,
    LoginResponse, MessageResponse, ProductRequest, ProductResponse, RegisterRequest,
    RegisterResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::products::controller::create_product,
        crate::modules::products::controller::get_products,
        crate::modules::products::controller::search_products,
        crate::modules::products::controller::get_product_by_id,
        crate::modules::products::controller::update_product,
        crate::modules::products::controller::delete_product,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::get_categories,
        crate::modules::categories::controller::get_category_by_id,
        crate::modules::categories::controller::update_category,
        crate::modules::categories::controller::delete_category,
    ),
    components(
        schemas(
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            ProductRequest,
            ProductResponse,
            CategoryLabel,
            CategoryRequest,
            CategoryResponse,
            CategorySummary,
        )
    ),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Products", description = "Product catalogue management"),
        (name = "Categories", description = "Product category management")
    ),
    info(
        title = "Stockroom API",
        version = "0.1.0",
        description = "Inventory REST API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_endpoint_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/products",
            "/api/products/search",
            "/api/products/{id}",
            "/api/categories",
            "/api/categories/{id}",
        ] {
            assert!(paths.contains(&expected), "missing path {expected}");
        }
    }
}
