//! Persistence abstraction.
//!
//! Services depend on these traits only. [`PgStore`] is the production
//! implementation; [`MemoryStore`] keeps everything in process and is used by
//! the test suite and the `--in-memory` development mode.
//!
//! Both implementations enforce uniqueness themselves and report violations
//! as [`RepositoryError::Conflict`] with one of the [`constraints`] names, so
//! a duplicate that slips past a service's pre-check is still rejected.

use async_trait::async_trait;
use stockroom_core::RepositoryError;
use stockroom_models::{Category, NewCategory, NewProduct, NewUser, Product, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Unique constraint names, shared by the migration and both stores.
pub mod constraints {
    pub const USERS_EMAIL: &str = "users_email_key";
    pub const USERS_USERNAME: &str = "users_username_key";
    pub const PRODUCTS_NAME: &str = "products_name_key";
    pub const CATEGORIES_NAME: &str = "categories_name_key";
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError>;
    async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError>;
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products ordered by id.
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;
    /// Products whose name contains `term`, ignoring case, ordered by id.
    async fn search_by_name(&self, term: &str) -> Result<Vec<Product>, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError>;
    /// Exact, case-sensitive match.
    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError>;
    async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError>;
    /// Writes every mutable field of `product` and refreshes `updated_at`.
    /// Returns `None` when the row no longer exists.
    async fn update(&self, product: &Product) -> Result<Option<Product>, RepositoryError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by id.
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepositoryError>;
    /// Exact, case-sensitive match.
    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError>;
    async fn insert(&self, category: NewCategory) -> Result<Category, RepositoryError>;
    async fn update(&self, category: &Category) -> Result<Option<Category>, RepositoryError>;
    /// Removes the category and detaches it from every product.
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}
