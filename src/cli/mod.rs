//! Administrative commands run by the `stockroom-cli` binary.
//!
//! Everything goes through the same services as the HTTP API, so seeded data
//! passes the same validation and uniqueness checks.

pub mod seeder;

pub use seeder::{SeedReport, seed_categories, seed_products};
