use std::time::Instant;

use fake::Fake;
use fake::faker::lorem::en::Word;
use rust_decimal::Decimal;
use stockroom_core::{CategoryLabel, ServiceError};
use stockroom_models::{CategoryRequest, ProductRequest};
use tracing::debug;

use crate::modules::categories::CategoryService;
use crate::modules::products::ProductService;

/// Outcome of a seeding run. Rows rejected as duplicates or invalid are
/// counted as skipped; any other failure aborts the run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub skipped: usize,
}

impl SeedReport {
    fn record<T>(&mut self, result: Result<T, ServiceError>) -> Result<(), ServiceError> {
        match result {
            Ok(_) => self.created += 1,
            Err(ServiceError::BadRequest(reason)) => {
                debug!(%reason, "Skipping seed row");
                self.skipped += 1;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

fn nouns(label: CategoryLabel) -> &'static [&'static str] {
    match label {
        CategoryLabel::Electronics => &["Laptop", "Headphones", "Monitor", "Keyboard"],
        CategoryLabel::Clothing => &["Jacket", "Sweater", "Sneakers", "Scarf"],
        CategoryLabel::Food => &["Granola", "Coffee Beans", "Olive Oil", "Tea"],
        CategoryLabel::Books => &["Novel", "Cookbook", "Atlas", "Journal"],
        CategoryLabel::Sports => &["Yoga Mat", "Football", "Dumbbell", "Racket"],
        CategoryLabel::Home => &["Lamp", "Armchair", "Rug", "Vase"],
        CategoryLabel::Other => &["Gift Card", "Sticker Pack", "Tote Bag", "Puzzle"],
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Generates a plausible product payload.
pub fn generate_product() -> ProductRequest {
    let label = CategoryLabel::ALL[(0..CategoryLabel::ALL.len()).fake::<usize>()];
    let choices = nouns(label);
    let noun = choices[(0..choices.len()).fake::<usize>()];
    let adjective: String = Word().fake();

    ProductRequest {
        name: Some(format!("{} {}", capitalize(&adjective), noun)),
        description: Some(format!("{} from the {} range", noun, label.display_name())),
        price: Some(Decimal::new((99..250_000i64).fake::<i64>(), 2)),
        quantity: Some((0..500i64).fake::<i64>()),
        category: Some(label.as_str().to_string()),
        category_id: None,
    }
}

/// Creates one category per product label.
pub async fn seed_categories(categories: &CategoryService) -> Result<SeedReport, ServiceError> {
    let start_time = Instant::now();
    let mut report = SeedReport::default();

    for label in CategoryLabel::ALL {
        let result = categories
            .create(CategoryRequest {
                name: Some(label.display_name().to_string()),
                description: Some(format!("{} products", label.display_name())),
            })
            .await;
        report.record(result)?;
    }

    println!(
        "   ✓ Seeded {} categories ({} skipped) in {:?}",
        report.created,
        report.skipped,
        start_time.elapsed()
    );
    Ok(report)
}

/// Attempts `count` fake products. Generated names can collide with existing
/// ones; those attempts are skipped rather than retried.
pub async fn seed_products(
    products: &ProductService,
    count: usize,
) -> Result<SeedReport, ServiceError> {
    let start_time = Instant::now();
    let mut report = SeedReport::default();

    for _ in 0..count {
        let result = products.create(generate_product()).await;
        report.record(result)?;
    }

    println!(
        "   ✓ Seeded {} products ({} skipped) in {:?}",
        report.created,
        report.skipped,
        start_time.elapsed()
    );
    Ok(report)
}
