use async_trait::async_trait;

use super::{CreateUserDto, UpdateProfileDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact-match lookup; callers normalize before calling.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn find_by_verification_token(&self, token: &str) -> DomainResult<Option<User>>;

    /// Insert a new user with a generated id and `created_at`.
    ///
    /// Email uniqueness is NOT checked here; callers must look the email
    /// up first.
    async fn create(&self, dto: CreateUserDto) -> DomainResult<User>;

    /// Set `last_login` to now. Silent no-op for an unknown id.
    async fn update_last_login(&self, id: &str) -> DomainResult<()>;

    /// Overwrite the stored hash. Silent no-op for an unknown id.
    async fn update_password(&self, id: &str, password_hash: &str) -> DomainResult<()>;

    async fn update_profile(&self, id: &str, dto: UpdateProfileDto) -> DomainResult<Option<User>>;

    /// Set `email_verified` and clear the verification token.
    async fn mark_email_verified(&self, id: &str) -> DomainResult<Option<User>>;

    /// Admin listing. Every record has its password hash redacted.
    async fn find_all(&self) -> DomainResult<Vec<User>>;

    /// Remove the user and return the removed record. Tokens and login
    /// logs referencing the id are left in place.
    async fn delete(&self, id: &str) -> DomainResult<Option<User>>;

    async fn count(&self) -> DomainResult<usize>;
}
