//! # auth-guard
//!
//! Authentication backend primitives: a fixed-window rate limiter for
//! brute-force-prone actions, an in-memory account store (users, login
//! audit log, refresh and password-reset tokens), and input validators.
//!
//! ## Architecture
//!
//! - **domain**: entities, DTOs and repository traits
//! - **application**: rate limiter, cleanup task and the account flows
//! - **infrastructure**: in-memory storage, crypto helpers, notifier
//! - **shared**: clock, shutdown signal, errors and validators
//! - **runtime**: startup and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod shared;

pub use application::{AuthError, AuthService, RateLimiter};
pub use config::{default_config_path, AppConfig};
pub use infrastructure::InMemoryRepositoryProvider;
pub use runtime::{AuthRuntime, RuntimeOptions};
