//! One-way password hashing and verification.
//!
//! Wraps bcrypt with a configurable work factor. Hashing is deliberately
//! expensive, so both operations run on the blocking thread pool; the caller
//! still awaits the result before responding.

use crate::errors::{ServiceError, ServiceResult};

/// Salted adaptive hashing of user passwords.
pub struct CredentialStore {
    cost: u32,
}

impl CredentialStore {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password. Fails only on underlying crypto failure.
    pub async fn hash(&self, password: &str) -> ServiceResult<String> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| ServiceError::internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| ServiceError::internal(format!("Password hashing failed: {}", e)))
    }

    /// Verifies a plaintext password against a stored hash. A non-matching
    /// password returns `Ok(false)`; bcrypt's comparison is constant-time.
    pub async fn verify(&self, password: &str, hash: &str) -> ServiceResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| {
                ServiceError::internal(format!("Password verification task failed: {}", e))
            })?
            .map_err(|e| ServiceError::internal(format!("Password verification failed: {}", e)))
    }
}
