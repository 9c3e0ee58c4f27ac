use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockroom_core::CategoryLabel;
use utoipa::{IntoParams, ToSchema};

use crate::categories::CategorySummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub category: CategoryLabel,
    /// Optional link to a [`crate::Category`] record.
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub category: CategoryLabel,
    pub category_id: Option<i64>,
}

/// Product payload for create and update.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[schema(example = "Mechanical Keyboard")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>, example = 89.99)]
    pub price: Option<Decimal>,
    #[schema(example = 25)]
    pub quantity: Option<i64>,
    /// One of ELECTRONICS, CLOTHING, FOOD, BOOKS, SPORTS, HOME, OTHER.
    #[schema(example = "ELECTRONICS")]
    pub category: Option<String>,
    pub category_id: Option<i64>,
}

/// Validated and normalized product fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub category: CategoryLabel,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub quantity: i32,
    pub category: CategoryLabel,
    pub category_id: Option<i64>,
    pub category_info: Option<CategorySummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductSearchParams {
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
    /// Alias of `search`.
    pub keyword: Option<String>,
}

impl ProductSearchParams {
    /// The effective search term, `None` when blank.
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .or(self.keyword.as_deref())
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_accepts_numeric_and_string_prices() {
        let numeric: ProductRequest =
            serde_json::from_str(r#"{"name":"Pen","price":99.99,"quantity":3}"#).unwrap();
        let text: ProductRequest = serde_json::from_str(r#"{"price":"0.01"}"#).unwrap();

        assert_eq!(numeric.price, Some(Decimal::new(9999, 2)));
        assert_eq!(text.price, Some(Decimal::new(1, 2)));
    }

    #[test]
    fn search_term_prefers_search_over_keyword() {
        let params = ProductSearchParams {
            search: Some(" lap ".to_string()),
            keyword: Some("desk".to_string()),
        };
        assert_eq!(params.term(), Some("lap"));

        let blank = ProductSearchParams {
            search: Some("  ".to_string()),
            keyword: None,
        };
        assert_eq!(blank.term(), None);
    }
}
