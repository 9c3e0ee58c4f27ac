use std::collections::HashMap;
use std::sync::Arc;

use stockroom_core::rules::{self, ValidationError};
use stockroom_core::{RepositoryError, ServiceError};
use stockroom_models::{Category, Product, ProductInput, ProductRequest, ProductResponse};
use tracing::{info, instrument};

use super::mapper;
use crate::repository::{CategoryRepository, ProductRepository, constraints};

/// Validates and normalizes a product payload. Missing fields are reported
/// before any range or format violation.
pub fn validate_request(request: &ProductRequest) -> Result<ProductInput, ValidationError> {
    let name = rules::required(request.name.as_deref(), "Product name is required")?;
    let price = request
        .price
        .ok_or_else(|| ValidationError::new("Price is required"))?;
    let quantity = request
        .quantity
        .ok_or_else(|| ValidationError::new("Quantity is required"))?;
    let category = rules::required(request.category.as_deref(), "Category is required")?;

    Ok(ProductInput {
        name: rules::product_name(Some(name))?,
        description: rules::description(request.description.as_deref())?,
        price: rules::price(Some(price))?,
        quantity: rules::quantity(Some(quantity))?,
        category: rules::category_label(Some(category))?,
        category_id: request.category_id,
    })
}

fn not_found(id: i64) -> ServiceError {
    ServiceError::not_found(format!("Product not found with id: {}", id))
}

fn duplicate_name(name: &str) -> ServiceError {
    ServiceError::bad_request(format!("Product with name '{}' already exists", name))
}

fn conflict_or(err: RepositoryError, name: &str) -> ServiceError {
    match &err {
        RepositoryError::Conflict { constraint } if constraint == constraints::PRODUCTS_NAME => {
            duplicate_name(name)
        }
        _ => err.into(),
    }
}

pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, request: ProductRequest) -> Result<ProductResponse, ServiceError> {
        let input = validate_request(&request)?;

        if self.products.exists_by_name(&input.name).await? {
            return Err(duplicate_name(&input.name));
        }
        let category = self.resolve_category(input.category_id).await?;

        let name = input.name.clone();
        let product = self
            .products
            .insert(mapper::to_entity(input, category.as_ref()))
            .await
            .map_err(|e| conflict_or(e, &name))?;

        info!(product_id = product.id, name = %product.name, "Product created");
        Ok(mapper::to_response(&product, category.as_ref()))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let products = self.products.find_all().await?;
        self.to_responses(products).await
    }

    /// Case-insensitive substring search on the name. A blank keyword
    /// returns every product.
    #[instrument(skip(self))]
    pub async fn search(&self, keyword: &str) -> Result<Vec<ProductResponse>, ServiceError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list().await;
        }
        rules::printable(keyword, "Search keyword")?;
        let products = self.products.search_by_name(keyword).await?;
        self.to_responses(products).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<ProductResponse, ServiceError> {
        let product = self.products.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
        let category = self.linked_category(&product).await?;
        Ok(mapper::to_response(&product, category.as_ref()))
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i64,
        request: ProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        let mut product = self.products.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
        let input = validate_request(&request)?;

        if input.name != product.name && self.products.exists_by_name(&input.name).await? {
            return Err(duplicate_name(&input.name));
        }
        let category = self.resolve_category(input.category_id).await?;

        let name = input.name.clone();
        mapper::update_entity(&mut product, input, category.as_ref());
        let product = self
            .products
            .update(&product)
            .await
            .map_err(|e| conflict_or(e, &name))?
            .ok_or_else(|| not_found(id))?;

        info!(product_id = product.id, "Product updated");
        Ok(mapper::to_response(&product, category.as_ref()))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.products.delete(id).await? {
            return Err(not_found(id));
        }
        info!(product_id = id, "Product deleted");
        Ok(())
    }

    async fn resolve_category(&self, id: Option<i64>) -> Result<Option<Category>, ServiceError> {
        let Some(id) = id else {
            return Ok(None);
        };
        match self.categories.find_by_id(id).await? {
            Some(category) => Ok(Some(category)),
            None => Err(ServiceError::bad_request(format!(
                "Category not found with id: {}",
                id
            ))),
        }
    }

    async fn linked_category(&self, product: &Product) -> Result<Option<Category>, ServiceError> {
        match product.category_id {
            Some(id) => Ok(self.categories.find_by_id(id).await?),
            None => Ok(None),
        }
    }

    async fn to_responses(
        &self,
        products: Vec<Product>,
    ) -> Result<Vec<ProductResponse>, ServiceError> {
        let categories: HashMap<i64, Category> = if products.iter().any(|p| p.category_id.is_some())
        {
            self.categories
                .find_all()
                .await?
                .into_iter()
                .map(|c| (c.id, c))
                .collect()
        } else {
            HashMap::new()
        };

        Ok(products
            .iter()
            .map(|p| {
                let category = p.category_id.and_then(|id| categories.get(&id));
                mapper::to_response(p, category)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;
    use rust_decimal::Decimal;
    use stockroom_models::{CategoryLabel, NewCategory};

    fn service(store: &MemoryStore) -> ProductService {
        ProductService::new(Arc::new(store.clone()), Arc::new(store.clone()))
    }

    fn request(name: &str) -> ProductRequest {
        ProductRequest {
            name: Some(name.to_string()),
            description: Some("Nice".to_string()),
            price: Some(Decimal::new(99999, 2)),
            quantity: Some(10),
            category: Some("ELECTRONICS".to_string()),
            category_id: None,
        }
    }

    fn message(err: ServiceError) -> String {
        match err {
            ServiceError::BadRequest(m) | ServiceError::NotFound(m) => m,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_fields_are_reported_before_range_errors() {
        let request = ProductRequest {
            name: Some("ab".to_string()),
            price: None,
            ..request("unused")
        };

        let err = validate_request(&request).unwrap_err();

        assert_eq!(err.message(), "Price is required");
    }

    #[tokio::test]
    async fn create_then_get_returns_the_same_product() {
        let store = MemoryStore::new();
        let products = service(&store);

        let created = products.create(request("Laptop")).await.unwrap();
        let first = products.get_by_id(created.id).await.unwrap();
        let second = products.get_by_id(created.id).await.unwrap();

        assert_eq!(created, first);
        assert_eq!(first, second);
        assert_eq!(first.category, CategoryLabel::Electronics);
        assert_eq!(first.category_info, None);
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected() {
        let store = MemoryStore::new();
        let products = service(&store);
        products.create(request("Laptop")).await.unwrap();

        let err = products.create(request("Laptop")).await.unwrap_err();

        assert_eq!(message(err), "Product with name 'Laptop' already exists");
    }

    #[tokio::test]
    async fn invalid_category_label_never_writes() {
        let store = MemoryStore::new();
        let products = service(&store);
        let mut bad = request("Laptop");
        bad.category = Some("INVALID".to_string());

        let err = products.create(bad).await.unwrap_err();

        assert!(message(err).starts_with("Invalid category: INVALID"));
        assert_eq!(store.write_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_category_id_is_a_bad_request() {
        let store = MemoryStore::new();
        let products = service(&store);
        let mut linked = request("Laptop");
        linked.category_id = Some(42);

        let err = products.create(linked).await.unwrap_err();

        assert!(matches!(err, ServiceError::BadRequest(ref m) if m == "Category not found with id: 42"));
    }

    #[tokio::test]
    async fn linked_category_is_embedded() {
        let store = MemoryStore::new();
        let category = CategoryRepository::insert(
            &store,
            NewCategory {
                name: "Computers".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
        let products = service(&store);
        let mut linked = request("Laptop");
        linked.category_id = Some(category.id);

        let created = products.create(linked).await.unwrap();
        let listed = products.list().await.unwrap();

        assert_eq!(created.category_id, Some(category.id));
        assert_eq!(
            created.category_info.as_ref().map(|c| c.name.as_str()),
            Some("Computers")
        );
        assert_eq!(listed[0].category_info, created.category_info);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_blank_lists_all() {
        let store = MemoryStore::new();
        let products = service(&store);
        products.create(request("Gaming Laptop")).await.unwrap();
        products.create(request("Office Desk")).await.unwrap();

        let found = products.search("laptop").await.unwrap();
        let all = products.search("   ").await.unwrap();
        let none = products.search("chair").await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Gaming Laptop");
        assert_eq!(all.len(), 2);
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn search_rejects_nul_in_the_keyword() {
        let store = MemoryStore::new();
        let products = service(&store);

        let err = products.search("a\0b").await.unwrap_err();

        assert_eq!(message(err), "Search keyword contains invalid characters");
    }

    #[tokio::test]
    async fn update_allows_keeping_the_same_name() {
        let store = MemoryStore::new();
        let products = service(&store);
        let created = products.create(request("Laptop")).await.unwrap();

        let mut changed = request("Laptop");
        changed.quantity = Some(3);
        let updated = products.update(created.id, changed).await.unwrap();

        assert_eq!(updated.quantity, 3);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_rejects_renaming_onto_another_product() {
        let store = MemoryStore::new();
        let products = service(&store);
        products.create(request("Laptop")).await.unwrap();
        let desk = products.create(request("Desk")).await.unwrap();

        let err = products.update(desk.id, request("Laptop")).await.unwrap_err();

        assert_eq!(message(err), "Product with name 'Laptop' already exists");
    }

    #[tokio::test]
    async fn update_of_missing_product_is_not_found() {
        let store = MemoryStore::new();
        let products = service(&store);

        let err = products.update(5, request("Laptop")).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Product not found with id: 5"));
    }

    #[tokio::test]
    async fn delete_removes_and_then_reports_not_found() {
        let store = MemoryStore::new();
        let products = service(&store);
        let created = products.create(request("Laptop")).await.unwrap();

        products.delete(created.id).await.unwrap();
        let err = products.delete(created.id).await.unwrap_err();

        assert_eq!(
            message(err),
            format!("Product not found with id: {}", created.id)
        );
        assert!(products.list().await.unwrap().is_empty());
    }
}
