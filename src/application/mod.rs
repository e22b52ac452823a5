pub mod identity;
pub mod ports;
pub mod rate_limit;

// Re-export key types for convenience
pub use identity::{
    AuthError, AuthService, AuthSession, AuthSettings, ChangePasswordRequest, ClientContext,
    RegisterRequest, ResetPasswordRequest, UpdateProfileRequest,
};
pub use ports::{HashError, Notifier, PasswordHasher};
pub use rate_limit::{start_rate_limit_cleanup_task, RateLimiter, SharedRateLimiter};
