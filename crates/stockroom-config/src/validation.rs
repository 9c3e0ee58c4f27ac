//! Validation policy.
//!
//! The rules that differed between historical deployments of the service
//! are expressed here as data instead of literals inside the rule functions.
//! Everything else lives in `stockroom_core::rules::limits`.
//!
//! # Environment Variables
//!
//! - `PASSWORD_MIN_LENGTH`: minimum password length (default: 6)
//! - `REQUIRE_USERNAME`: reject registrations without a username (default: false)

use crate::{env_flag, env_or};

/// Inclusive character-count bounds for a string field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: u64,
    pub max: u64,
}

impl LengthBounds {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub username: LengthBounds,
    pub password: LengthBounds,
    pub require_username: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            username: LengthBounds::new(3, 50),
            password: LengthBounds::new(6, 100),
            require_username: false,
        }
    }
}

impl ValidationPolicy {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let password_min = env_or("PASSWORD_MIN_LENGTH", defaults.password.min)
            .clamp(1, defaults.password.max);

        Self {
            password: LengthBounds::new(password_min, defaults.password.max),
            require_username: env_flag("REQUIRE_USERNAME", defaults.require_username),
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_documented_limits() {
        let policy = ValidationPolicy::default();

        assert_eq!(policy.username, LengthBounds::new(3, 50));
        assert_eq!(policy.password, LengthBounds::new(6, 100));
        assert!(!policy.require_username);
    }
}
