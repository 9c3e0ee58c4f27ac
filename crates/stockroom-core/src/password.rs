use bcrypt::{BcryptError, DEFAULT_COST, non_truncating_hash, non_truncating_verify};

use crate::errors::ServiceError;

/// One-way password transformation used for storage and verification.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, ServiceError>;

    /// Returns `Ok(false)` on mismatch and `Err` only when `hash` is malformed.
    /// Input longer than the hash function reads is a mismatch, never a
    /// prefix match.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, ServiceError>;
}

#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// bcrypt accepts work factors from 4 to 31.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, ServiceError> {
        non_truncating_hash(password, self.cost)
            .map_err(|e| ServiceError::Hashing(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, ServiceError> {
        match non_truncating_verify(password, hash) {
            Err(BcryptError::Truncation(_)) => Ok(false),
            other => other
                .map_err(|e| ServiceError::Hashing(format!("Failed to verify password: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_is_clamped_to_the_bcrypt_range() {
        assert_eq!(BcryptHasher::new(1).cost(), 4);
        assert_eq!(BcryptHasher::new(40).cost(), 31);
        assert_eq!(BcryptHasher::default().cost(), DEFAULT_COST);
    }

    #[test]
    fn cheap_hasher_round_trips() {
        let hasher = BcryptHasher::new(4);
        let hashed = hasher.hash("Pass123").unwrap();

        assert_ne!(hashed, "Pass123");
        assert!(hasher.verify("Pass123", &hashed).unwrap());
        assert!(!hasher.verify("Pass124", &hashed).unwrap());
    }

    #[test]
    fn long_input_never_matches_on_a_shared_prefix() {
        let hasher = BcryptHasher::new(4);
        let stored = format!("{}1", "a".repeat(70));
        let hashed = hasher.hash(&stored).unwrap();

        assert!(hasher.verify(&stored, &hashed).unwrap());
        assert!(!hasher.verify(&format!("{}2", "a".repeat(79)), &hashed).unwrap());
        assert!(hasher.hash(&"a".repeat(80)).is_err());
    }
}
