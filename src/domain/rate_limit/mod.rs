//! Rate limit vocabulary shared by the limiter and its callers

pub mod model;

pub use model::{RateLimitAction, RateLimitDecision, RateLimitEntry, RateLimitPolicy};
