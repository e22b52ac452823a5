pub mod login_log;
pub mod password_reset;
pub mod rate_limit;
pub mod refresh_token;
pub mod repositories;
pub mod user;

// Re-export commonly used types
pub use login_log::{CreateLoginLogDto, LoginLog, LoginLogRepository, UNKNOWN_USER_ID};
pub use password_reset::{
    CreatePasswordResetTokenDto, PasswordResetToken, PasswordResetTokenRepository,
};
pub use rate_limit::{RateLimitAction, RateLimitDecision, RateLimitEntry, RateLimitPolicy};
pub use refresh_token::{CreateRefreshTokenDto, RefreshToken, RefreshTokenRepository};
pub use repositories::{DomainResult, RepositoryProvider};
pub use user::{
    CreateUserDto, UpdateProfileDto, User, UserRepository, UserRole, REDACTED_PASSWORD_HASH,
};

pub use crate::shared::types::DomainError;
