use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use stockroom_core::RepositoryError;
use stockroom_models::{Category, NewCategory, NewProduct, NewUser, Product, User};
use tokio::sync::RwLock;

use super::{CategoryRepository, ProductRepository, UserRepository, constraints};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    products: BTreeMap<i64, Product>,
    categories: BTreeMap<i64, Category>,
    last_user_id: i64,
    last_product_id: i64,
    last_category_id: i64,
    writes: usize,
}

/// In-process store implementing every repository trait.
///
/// All tables sit behind a single lock, so each call is atomic with respect
/// to the others. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mutating calls that reached the store, successful or not.
    pub async fn write_count(&self) -> usize {
        self.tables.read().await.writes
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.writes += 1;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::conflict(constraints::USERS_EMAIL));
        }
        if user.username.is_some()
            && tables.users.values().any(|u| u.username == user.username)
        {
            return Err(RepositoryError::conflict(constraints::USERS_USERNAME));
        }

        tables.last_user_id += 1;
        let now = Utc::now();
        let stored = User {
            id: tables.last_user_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            full_name: user.full_name,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(stored.id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.products.values().cloned().collect())
    }

    async fn search_by_name(&self, term: &str) -> Result<Vec<Product>, RepositoryError> {
        let needle = term.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.products.get(&id).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.products.values().any(|p| p.name == name))
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.writes += 1;

        if tables.products.values().any(|p| p.name == product.name) {
            return Err(RepositoryError::conflict(constraints::PRODUCTS_NAME));
        }

        tables.last_product_id += 1;
        let now = Utc::now();
        let stored = Product {
            id: tables.last_product_id,
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            category: product.category,
            category_id: product.category_id,
            created_at: now,
            updated_at: now,
        };
        tables.products.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, product: &Product) -> Result<Option<Product>, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.writes += 1;

        if tables
            .products
            .values()
            .any(|p| p.id != product.id && p.name == product.name)
        {
            return Err(RepositoryError::conflict(constraints::PRODUCTS_NAME));
        }

        let Some(existing) = tables.products.get_mut(&product.id) else {
            return Ok(None);
        };
        *existing = Product {
            created_at: existing.created_at,
            updated_at: Utc::now(),
            ..product.clone()
        };
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.writes += 1;
        Ok(tables.products.remove(&id).is_some())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.get(&id).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().any(|c| c.name == name))
    }

    async fn insert(&self, category: NewCategory) -> Result<Category, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.writes += 1;

        if tables.categories.values().any(|c| c.name == category.name) {
            return Err(RepositoryError::conflict(constraints::CATEGORIES_NAME));
        }

        tables.last_category_id += 1;
        let now = Utc::now();
        let stored = Category {
            id: tables.last_category_id,
            name: category.name,
            description: category.description,
            created_at: now,
            updated_at: now,
        };
        tables.categories.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, category: &Category) -> Result<Option<Category>, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.writes += 1;

        if tables
            .categories
            .values()
            .any(|c| c.id != category.id && c.name == category.name)
        {
            return Err(RepositoryError::conflict(constraints::CATEGORIES_NAME));
        }

        let Some(existing) = tables.categories.get_mut(&category.id) else {
            return Ok(None);
        };
        *existing = Category {
            created_at: existing.created_at,
            updated_at: Utc::now(),
            ..category.clone()
        };
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.writes += 1;

        if tables.categories.remove(&id).is_none() {
            return Ok(false);
        }
        // Mirrors ON DELETE SET NULL.
        for product in tables.products.values_mut() {
            if product.category_id == Some(id) {
                product.category_id = None;
            }
        }
        Ok(true)
    }
}
