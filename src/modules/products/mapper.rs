//! Conversions between product requests, entities and responses.
//!
//! All functions are pure. `category` is the relational category the
//! product is linked to, if any; it is only embedded in a response when its
//! id matches the product's `category_id`.

use stockroom_models::{Category, NewProduct, Product, ProductInput, ProductResponse};

use crate::modules::categories::mapper::to_summary;

pub fn to_entity(input: ProductInput, category: Option<&Category>) -> NewProduct {
    NewProduct {
        name: input.name,
        description: input.description,
        price: input.price,
        quantity: input.quantity,
        category: input.category,
        category_id: category.map(|c| c.id),
    }
}

pub fn to_response(product: &Product, category: Option<&Category>) -> ProductResponse {
    ProductResponse {
        id: product.id,
        name: product.name.clone(),
        description: product.description.clone(),
        price: product.price,
        quantity: product.quantity,
        category: product.category,
        category_id: product.category_id,
        category_info: category
            .filter(|c| product.category_id == Some(c.id))
            .map(to_summary),
        created_at: product.created_at,
        updated_at: product.updated_at,
    }
}

/// Overwrites every mutable field. `id` and timestamps are left untouched.
pub fn update_entity(product: &mut Product, input: ProductInput, category: Option<&Category>) {
    product.name = input.name;
    product.description = input.description;
    product.price = input.price;
    product.quantity = input.quantity;
    product.category = input.category;
    product.category_id = category.map(|c| c.id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use stockroom_models::{CategoryLabel, CategorySummary};

    fn input() -> ProductInput {
        ProductInput {
            name: "Laptop".to_string(),
            description: Some("Fast".to_string()),
            price: Decimal::new(99999, 2),
            quantity: 10,
            category: CategoryLabel::Electronics,
            category_id: Some(7),
        }
    }

    fn category(id: i64) -> Category {
        let now = Utc::now();
        Category {
            id,
            name: "Computers".to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn stored(entity: NewProduct) -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            name: entity.name,
            description: entity.description,
            price: entity.price,
            quantity: entity.quantity,
            category: entity.category,
            category_id: entity.category_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn entity_takes_its_link_from_the_resolved_category() {
        let linked = to_entity(input(), Some(&category(7)));
        let unlinked = to_entity(input(), None);

        assert_eq!(linked.category_id, Some(7));
        assert_eq!(unlinked.category_id, None);
        assert_eq!(linked.name, "Laptop");
        assert_eq!(linked.category, CategoryLabel::Electronics);
    }

    #[test]
    fn response_embeds_matching_category_only() {
        let product = stored(to_entity(input(), Some(&category(7))));

        let matching = to_response(&product, Some(&category(7)));
        let other = to_response(&product, Some(&category(8)));

        assert_eq!(
            matching.category_info,
            Some(CategorySummary {
                id: 7,
                name: "Computers".to_string()
            })
        );
        assert_eq!(other.category_info, None);
        assert_eq!(matching.price, Decimal::new(99999, 2));
    }

    #[test]
    fn round_trip_preserves_request_fields() {
        let computers = category(7);
        for linked in [Some(&computers), None] {
            let request = input();
            let response = to_response(&stored(to_entity(request.clone(), linked)), linked);

            assert_eq!(response.name, request.name);
            assert_eq!(response.description, request.description);
            assert_eq!(response.price, request.price);
            assert_eq!(response.quantity, request.quantity);
            assert_eq!(response.category, request.category);
            assert_eq!(response.category_id, linked.map(|c| c.id));
            assert_eq!(response.category_info, linked.map(to_summary));
        }
    }

    #[test]
    fn update_keeps_identity_and_timestamps() {
        let mut product = stored(to_entity(input(), None));
        let created_at = product.created_at;

        let mut changed = input();
        changed.name = "Desktop".to_string();
        changed.description = None;
        update_entity(&mut product, changed, None);

        assert_eq!(product.id, 1);
        assert_eq!(product.created_at, created_at);
        assert_eq!(product.name, "Desktop");
        assert_eq!(product.description, None);
    }
}
