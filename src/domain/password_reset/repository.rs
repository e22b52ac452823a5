//! Password reset token repository interface

use async_trait::async_trait;

use super::model::{CreatePasswordResetTokenDto, PasswordResetToken};
use crate::domain::DomainResult;

#[async_trait]
pub trait PasswordResetTokenRepository: Send + Sync {
    async fn create(&self, dto: CreatePasswordResetTokenDto) -> DomainResult<PasswordResetToken>;

    /// Exact match on the token value. Does NOT filter out used or expired
    /// tokens; check [`PasswordResetToken::is_usable_at`] before trusting
    /// the result.
    async fn find_by_token(&self, token: &str) -> DomainResult<Option<PasswordResetToken>>;

    /// Set `used = true`. Returns `true` only for the call that flipped
    /// the flag, so concurrent consumers can tell who won. Unknown ids are
    /// a no-op returning `false`.
    async fn mark_as_used(&self, id: &str) -> DomainResult<bool>;
}
