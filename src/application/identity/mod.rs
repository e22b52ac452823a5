//! Account flows built on the rate limiter and the account store

mod error;
mod requests;
mod service;

pub use error::AuthError;
pub use requests::{
    ChangePasswordRequest, RegisterRequest, ResetPasswordRequest, UpdateProfileRequest,
};
pub use service::{AuthService, AuthSession, AuthSettings, ClientContext};
