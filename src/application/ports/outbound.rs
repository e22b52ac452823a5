//! Outbound ports: capabilities the auth flows consume but do not own
//!
//! [`Notifier`] delivers account emails and [`PasswordHasher`] turns
//! plaintext passwords into opaque hashes. Neither is implemented by the
//! core; adapters live in `infrastructure`.

use async_trait::async_trait;
use thiserror::Error;

/// Best-effort account notifications.
///
/// Methods return nothing: delivery failures are the adapter's concern
/// and never abort an auth flow.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_verification_email(&self, email: &str, token: &str);

    async fn send_password_reset_email(&self, email: &str, token: &str);

    async fn send_welcome_email(&self, email: &str, first_name: &str);

    async fn send_security_alert(&self, email: &str, action: &str, ip: &str);
}

#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(pub String);

/// Opaque hash-and-compare capability.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, HashError>;

    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}
