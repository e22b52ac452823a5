//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::application::ports::{HashError, PasswordHasher};

/// [`PasswordHasher`] backed by bcrypt with a configurable cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        hash(password, self.cost).map_err(|e| HashError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        verify(password, hash).map_err(|e| HashError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = BcryptPasswordHasher::new(4);
        let hashed = hasher.hash("secure_password_123").unwrap();

        assert_ne!(hashed, "secure_password_123");
        assert!(hasher.verify("secure_password_123", &hashed).unwrap());
        assert!(!hasher.verify("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = BcryptPasswordHasher::new(4);
        assert!(hasher.verify("anything", "not-a-bcrypt-hash").is_err());
    }
}
