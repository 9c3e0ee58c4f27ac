//! # Stockroom Models
//!
//! Domain entities and request/response DTOs for the Stockroom API.
//!
//! Entities (`User`, `Product`, `Category`) are the persisted shapes.
//! `*Request` types are what clients send: every field is optional so that a
//! missing value is reported by the validation rules with a proper message
//! instead of a deserialization failure. `*Input` types are the validated,
//! normalized form produced by the services.
//!
//! # Modules
//!
//! - [`auth`]: Registration and login DTOs
//! - [`categories`]: Category entity and DTOs
//! - [`products`]: Product entity and DTOs
//! - [`users`]: User entity

pub mod auth;
pub mod categories;
pub mod products;
pub mod users;

pub use stockroom_core::CategoryLabel;

pub use auth::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse};
pub use categories::{
    Category, CategoryInput, CategoryRequest, CategoryResponse, CategorySummary, NewCategory,
};
pub use products::{
    NewProduct, Product, ProductInput, ProductRequest, ProductResponse, ProductSearchParams,
};
pub use users::{NewUser, User};
