//! Password reset token domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Single-use password recovery credential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordResetToken {
    pub id: String,
    pub user_id: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
}

impl PasswordResetToken {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Not yet consumed and not past `expires_at`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        !self.used && !self.is_expired_at(now)
    }
}

#[derive(Debug, Clone)]
pub struct CreatePasswordResetTokenDto {
    pub user_id: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn used_or_expired_tokens_are_rejected() {
        let now = Utc::now();
        let mut t = PasswordResetToken {
            id: "r-1".into(),
            user_id: "u-1".into(),
            token: "tok".into(),
            created_at: now,
            expires_at: now + Duration::hours(1),
            used: false,
        };
        assert!(t.is_usable_at(now));
        assert!(!t.is_usable_at(now + Duration::hours(2)));

        t.used = true;
        assert!(!t.is_usable_at(now));
    }
}
