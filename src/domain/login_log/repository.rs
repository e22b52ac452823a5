//! Login log repository interface

use async_trait::async_trait;

use super::model::{CreateLoginLogDto, LoginLog};
use crate::domain::DomainResult;

#[async_trait]
pub trait LoginLogRepository: Send + Sync {
    /// Append a record with generated id and timestamp.
    async fn create(&self, dto: CreateLoginLogDto) -> DomainResult<LoginLog>;

    /// Records for one user, newest first.
    async fn find_by_user(&self, user_id: &str) -> DomainResult<Vec<LoginLog>>;

    /// Every record, newest first.
    async fn find_all(&self) -> DomainResult<Vec<LoginLog>>;
}
