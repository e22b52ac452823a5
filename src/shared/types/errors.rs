use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Already exists: {0}")]
    Conflict(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
