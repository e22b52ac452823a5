//! Refresh token domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session-continuation credential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub id: String,
    pub user_id: String,
    /// Opaque bearer value, unique across tokens
    pub token: String,
    pub ip: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

impl RefreshToken {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Neither revoked nor expired. Callers must check this before trusting
    /// a looked-up token.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && !self.is_expired_at(now)
    }
}

#[derive(Debug, Clone)]
pub struct CreateRefreshTokenDto {
    pub user_id: String,
    pub token: String,
    pub ip: String,
    pub user_agent: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expires_in: Duration, revoked: bool) -> (RefreshToken, DateTime<Utc>) {
        let now = Utc::now();
        let token = RefreshToken {
            id: "rt-1".into(),
            user_id: "u-1".into(),
            token: "abc".into(),
            ip: "1.2.3.4".into(),
            user_agent: "test".into(),
            created_at: now,
            expires_at: now + expires_in,
            revoked,
        };
        (token, now)
    }

    #[test]
    fn fresh_token_is_usable() {
        let (t, now) = token(Duration::days(7), false);
        assert!(t.is_usable_at(now));
    }

    #[test]
    fn revoked_token_is_not_usable() {
        let (t, now) = token(Duration::days(7), true);
        assert!(!t.is_usable_at(now));
    }

    #[test]
    fn expired_token_is_not_usable() {
        let (t, now) = token(Duration::days(7), false);
        assert!(t.is_usable_at(t.expires_at));
        assert!(!t.is_usable_at(now + Duration::days(7) + Duration::seconds(1)));
    }
}
