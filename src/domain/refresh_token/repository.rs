//! Refresh token repository interface

use async_trait::async_trait;

use super::model::{CreateRefreshTokenDto, RefreshToken};
use crate::domain::DomainResult;

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn create(&self, dto: CreateRefreshTokenDto) -> DomainResult<RefreshToken>;

    /// Exact match on the token value. Revoked and expired tokens are
    /// returned as-is.
    async fn find_by_token(&self, token: &str) -> DomainResult<Option<RefreshToken>>;

    /// Mark the token revoked. Returns `true` only for the call that
    /// flipped the flag; unknown or already revoked tokens give `false`.
    async fn revoke(&self, token: &str) -> DomainResult<bool>;

    /// Revoke every live token of a user and return how many were revoked.
    async fn revoke_all_for_user(&self, user_id: &str) -> DomainResult<usize>;
}
