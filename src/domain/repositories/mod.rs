//! Repository access for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::login_log::LoginLogRepository;
use super::password_reset::PasswordResetTokenRepository;
use super::refresh_token::RefreshTokenRepository;
use super::user::UserRepository;

pub use crate::shared::types::DomainResult;

/// Provides access to all account repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let user = repos.users().find_by_email("jane@example.com").await?;
///     let logs = repos.login_logs().find_by_user(&user.id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn login_logs(&self) -> &dyn LoginLogRepository;
    fn refresh_tokens(&self) -> &dyn RefreshTokenRepository;
    fn password_reset_tokens(&self) -> &dyn PasswordResetTokenRepository;
}
