//! # Stockroom Config
//!
//! Configuration types for the Stockroom API.
//!
//! Every structure is loaded from environment variables with sensible
//! defaults, so a bare `cargo run` against a local database works:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: Bind address, logging and metrics settings
//! - [`validation`]: Tunable input validation policy
//!
//! # Example
//!
//! ```ignore
//! use stockroom_config::{CorsConfig, DatabaseConfig, ServerConfig, ValidationPolicy};
//!
//! let server = ServerConfig::from_env();
//! let database = DatabaseConfig::from_env()?;
//! let policy = ValidationPolicy::from_env();
//! ```

use std::env;
use std::str::FromStr;

pub mod cors;
pub mod database;
pub mod server;
pub mod validation;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::{DatabaseConfig, MissingDatabaseUrl};
pub use server::{LoggingConfig, ServerConfig};
pub use validation::{LengthBounds, ValidationPolicy};

/// Reads `key` and parses it, falling back to `default` when the variable is
/// unset or unparsable.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Boolean flag parsing shared by all config modules: anything other than
/// `false`/`0`/`no`/`off` (case-insensitive) counts as enabled.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => !matches!(
            v.trim().to_lowercase().as_str(),
            "false" | "0" | "no" | "off"
        ),
        Err(_) => default,
    }
}
