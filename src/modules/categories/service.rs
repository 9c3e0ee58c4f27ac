use std::sync::Arc;

use stockroom_core::rules::{self, ValidationError};
use stockroom_core::{RepositoryError, ServiceError};
use stockroom_models::{CategoryInput, CategoryRequest, CategoryResponse};
use tracing::{info, instrument};

use super::mapper;
use crate::repository::{CategoryRepository, constraints};

pub fn validate_request(request: &CategoryRequest) -> Result<CategoryInput, ValidationError> {
    Ok(CategoryInput {
        name: rules::category_name(request.name.as_deref())?,
        description: rules::description(request.description.as_deref())?,
    })
}

fn not_found(id: i64) -> ServiceError {
    ServiceError::not_found(format!("Category not found with id: {}", id))
}

fn duplicate_name(name: &str) -> ServiceError {
    ServiceError::bad_request(format!("Category with name '{}' already exists", name))
}

fn conflict_or(err: RepositoryError, name: &str) -> ServiceError {
    match &err {
        RepositoryError::Conflict { constraint } if constraint == constraints::CATEGORIES_NAME => {
            duplicate_name(name)
        }
        _ => err.into(),
    }
}

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, request: CategoryRequest) -> Result<CategoryResponse, ServiceError> {
        let input = validate_request(&request)?;

        if self.categories.exists_by_name(&input.name).await? {
            return Err(duplicate_name(&input.name));
        }

        let category = self
            .categories
            .insert(mapper::to_entity(&input))
            .await
            .map_err(|e| conflict_or(e, &input.name))?;

        info!(category_id = category.id, name = %category.name, "Category created");
        Ok(mapper::to_response(&category))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CategoryResponse>, ServiceError> {
        let categories = self.categories.find_all().await?;
        Ok(categories.iter().map(mapper::to_response).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<CategoryResponse, ServiceError> {
        self.categories
            .find_by_id(id)
            .await?
            .map(|c| mapper::to_response(&c))
            .ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i64,
        request: CategoryRequest,
    ) -> Result<CategoryResponse, ServiceError> {
        let mut category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        let input = validate_request(&request)?;

        if input.name != category.name && self.categories.exists_by_name(&input.name).await? {
            return Err(duplicate_name(&input.name));
        }

        let name = input.name.clone();
        mapper::update_entity(&mut category, input);
        let category = self
            .categories
            .update(&category)
            .await
            .map_err(|e| conflict_or(e, &name))?
            .ok_or_else(|| not_found(id))?;

        info!(category_id = category.id, "Category updated");
        Ok(mapper::to_response(&category))
    }

    /// Products linked to the category keep their label and lose the link.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.categories.delete(id).await? {
            return Err(not_found(id));
        }
        info!(category_id = id, "Category deleted");
        Ok(())
    }
}
