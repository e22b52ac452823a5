//! Login audit record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `user_id` recorded when no account matches the attempted email.
pub const UNKNOWN_USER_ID: &str = "unknown";

/// One authentication attempt. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginLog {
    pub id: String,
    /// Owning user, or [`UNKNOWN_USER_ID`]. May dangle after a user delete.
    pub user_id: String,
    pub user_email: String,
    pub ip: String,
    pub user_agent: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub reason: Option<String>,
}

impl LoginLog {
    pub fn is_unknown_user(&self) -> bool {
        self.user_id == UNKNOWN_USER_ID
    }
}

#[derive(Debug, Clone)]
pub struct CreateLoginLogDto {
    pub user_id: String,
    pub user_email: String,
    pub ip: String,
    pub user_agent: String,
    pub success: bool,
    pub reason: Option<String>,
}

impl CreateLoginLogDto {
    pub fn success(
        user_id: impl Into<String>,
        user_email: impl Into<String>,
        ip: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_email: user_email.into(),
            ip: ip.into(),
            user_agent: user_agent.into(),
            success: true,
            reason: Some("Successful login".into()),
        }
    }

    pub fn failure(
        user_id: impl Into<String>,
        user_email: impl Into<String>,
        ip: impl Into<String>,
        user_agent: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_email: user_email.into(),
            ip: ip.into(),
            user_agent: user_agent.into(),
            success: false,
            reason: Some(reason.into()),
        }
    }

    /// Failed attempt against an email that matches no account.
    pub fn unknown_user(
        user_email: impl Into<String>,
        ip: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self::failure(UNKNOWN_USER_ID, user_email, ip, user_agent, "User not found")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_user_uses_sentinel() {
        let dto = CreateLoginLogDto::unknown_user("ghost@example.com", "10.0.0.1", "curl/8.0");
        assert_eq!(dto.user_id, UNKNOWN_USER_ID);
        assert!(!dto.success);
        assert_eq!(dto.reason.as_deref(), Some("User not found"));
    }

    #[test]
    fn success_carries_reason() {
        let dto = CreateLoginLogDto::success("u-1", "a@b.c", "1.2.3.4", "Mozilla/5.0");
        assert!(dto.success);
        assert_eq!(dto.reason.as_deref(), Some("Successful login"));
    }
}
