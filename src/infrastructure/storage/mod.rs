//! Repository implementations

mod memory;

pub use memory::{
    InMemoryLoginLogRepository, InMemoryPasswordResetTokenRepository,
    InMemoryRefreshTokenRepository, InMemoryRepositoryProvider, InMemoryUserRepository,
};
