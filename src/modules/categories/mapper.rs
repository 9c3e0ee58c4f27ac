use stockroom_models::{Category, CategoryInput, CategoryResponse, CategorySummary, NewCategory};

pub fn to_entity(input: &CategoryInput) -> NewCategory {
    NewCategory {
        name: input.name.clone(),
        description: input.description.clone(),
    }
}

pub fn to_response(category: &Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name.clone(),
        description: category.description.clone(),
        created_at: category.created_at,
        updated_at: category.updated_at,
    }
}

pub fn to_summary(category: &Category) -> CategorySummary {
    CategorySummary {
        id: category.id,
        name: category.name.clone(),
    }
}

pub fn update_entity(category: &mut Category, input: CategoryInput) {
    category.name = input.name;
    category.description = input.description;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn response_and_summary_mirror_the_entity() {
        let now = Utc::now();
        let mut category = Category {
            id: 3,
            name: "Books".to_string(),
            description: Some("Paper".to_string()),
            created_at: now,
            updated_at: now,
        };

        update_entity(
            &mut category,
            CategoryInput {
                name: "Novels".to_string(),
                description: None,
            },
        );
        let response = to_response(&category);

        assert_eq!(response.id, 3);
        assert_eq!(response.name, "Novels");
        assert_eq!(response.description, None);
        assert_eq!(response.created_at, now);
        assert_eq!(to_summary(&category).name, "Novels");
    }
}
