//! Password reset token aggregate

pub mod model;
pub mod repository;

pub use model::{CreatePasswordResetTokenDto, PasswordResetToken};
pub use repository::PasswordResetTokenRepository;
