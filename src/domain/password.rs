//! Password encoding - one-way credential transform.
//!
//! Services only see the [`PasswordEncoder`] trait; [`Argon2Encoder`] is the
//! production implementation.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Hashes plaintext passwords and checks them against stored hashes.
#[cfg_attr(test, automock)]
pub trait PasswordEncoder: Send + Sync {
    /// Hash a plaintext password for storage.
    fn encode(&self, raw: &str) -> AppResult<String>;

    /// Check a plaintext password against a stored hash.
    fn matches(&self, raw: &str, hash: &str) -> bool;
}

/// Argon2id encoder with the crate's default parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2Encoder;

impl Argon2Encoder {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl PasswordEncoder for Argon2Encoder {
    fn encode(&self, raw: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(raw.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn matches(&self, raw: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Self::argon2()
                .verify_password(raw.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_and_match() {
        let encoder = Argon2Encoder::new();
        let hash = encoder.encode("SecurePassword123!").unwrap();

        assert!(encoder.matches("SecurePassword123!", &hash));
        assert!(!encoder.matches("WrongPassword123", &hash));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = Argon2Encoder::new().encode("password").unwrap();

        assert_ne!(hash, "password");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let encoder = Argon2Encoder::new();
        let first = encoder.encode("SamePassword123").unwrap();
        let second = encoder.encode("SamePassword123").unwrap();

        assert_ne!(first, second);
        assert!(encoder.matches("SamePassword123", &first));
        assert!(encoder.matches("SamePassword123", &second));
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!Argon2Encoder::new().matches("password", "not-a-phc-string"));
    }
}
