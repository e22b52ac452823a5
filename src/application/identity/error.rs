use thiserror::Error;

use crate::application::ports::HashError;
use crate::domain::{DomainError, RateLimitAction};

/// Failures surfaced by [`AuthService`](super::AuthService) flows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Too many {action} attempts, retry in {retry_after_secs}s")]
    RateLimited {
        action: RateLimitAction,
        retry_after_secs: u64,
    },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid or revoked token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Validation: {0}")]
    Validation(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error(transparent)]
    Hashing(#[from] HashError),

    #[error("Failed to issue access token: {0}")]
    TokenIssue(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AuthError::Validation(errors.to_string())
    }
}
