//! # Stockroom Core
//!
//! Core types, errors, and utilities for the Stockroom API.
//!
//! - [`category`]: The closed set of product category labels
//! - [`errors`]: Service and repository errors, plus the HTTP-facing [`AppError`]
//! - [`password`]: One-way password hashing behind the [`PasswordHasher`] trait
//! - [`rules`]: Field-level validation rules shared by every service
//!
//! # Example
//!
//! ```ignore
//! use stockroom_core::rules;
//! use stockroom_core::{BcryptHasher, PasswordHasher, ServiceError};
//!
//! let email = rules::email("  Alice@Example.com ")?; // "alice@example.com"
//! let hash = BcryptHasher::default().hash("Pass123")?;
//! ```

pub mod category;
pub mod errors;
pub mod password;
pub mod rules;

// Re-export commonly used types at crate root
pub use category::{CategoryLabel, UnknownCategory};
pub use errors::{AppError, RepositoryError, ServiceError};
pub use password::{BcryptHasher, PasswordHasher};
pub use rules::ValidationError;
