use bcrypt::{BcryptError, hash, verify};
use thiserror::Error;

use crate::errors::AppError;

/// bcrypt cost factor used for account passwords.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(#[source] BcryptError),

    #[error("Failed to verify password: {0}")]
    Verify(#[source] BcryptError),
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::internal(PasswordError::Hash(e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash).map_err(|e| AppError::internal(PasswordError::Verify(e)))
}

/// Clamps a configured cost into the range bcrypt accepts.
pub fn clamp_cost(cost: u32) -> u32 {
    cost.clamp(MIN_COST, MAX_COST)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = MIN_COST;

    #[test]
    fn test_default_cost_is_twelve() {
        assert_eq!(DEFAULT_COST, 12);
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret", TEST_COST).unwrap();
        assert_ne!(hash, "secret");
        assert!(verify_password("secret", &hash).unwrap());
        assert!(!verify_password("Secret", &hash).unwrap());
    }

    #[test]
    fn test_hash_records_cost() {
        let hash = hash_password("secret", TEST_COST).unwrap();
        assert!(hash.contains("$04$"));
    }

    #[test]
    fn test_invalid_cost_is_error() {
        let err = hash_password("secret", 2).unwrap_err();
        assert_eq!(err.exit_code, crate::exit_codes::INTERNAL);
        assert!(matches!(
            err.error.downcast_ref::<PasswordError>(),
            Some(PasswordError::Hash(_))
        ));
        assert!(err.to_string().starts_with("Failed to hash password"));
    }

    #[test]
    fn test_malformed_hash_is_verify_error() {
        let err = verify_password("secret", "not_a_bcrypt_hash").unwrap_err();
        assert!(matches!(
            err.error.downcast_ref::<PasswordError>(),
            Some(PasswordError::Verify(_))
        ));
    }

    #[test]
    fn test_clamp_cost() {
        assert_eq!(clamp_cost(0), MIN_COST);
        assert_eq!(clamp_cost(12), 12);
        assert_eq!(clamp_cost(99), MAX_COST);
    }
}
