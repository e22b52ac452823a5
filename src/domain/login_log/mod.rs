//! Login audit trail

pub mod model;
pub mod repository;

pub use model::{CreateLoginLogDto, LoginLog, UNKNOWN_USER_ID};
pub use repository::LoginLogRepository;
