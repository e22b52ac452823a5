//! Refresh token aggregate

pub mod model;
pub mod repository;

pub use model::{CreateRefreshTokenDto, RefreshToken};
pub use repository::RefreshTokenRepository;
