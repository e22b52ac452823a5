//! Brute-force protection for login, registration and password recovery

mod cleanup;
mod limiter;

pub use cleanup::start_rate_limit_cleanup_task;
pub use limiter::{RateLimiter, SharedRateLimiter};
