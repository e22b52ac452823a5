//! User domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder returned instead of the stored hash in admin listings.
pub const REDACTED_PASSWORD_HASH: &str = "[HIDDEN]";

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Moderator,
    #[default]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::User => "user",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "moderator" => Some(Self::Moderator),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Unique across users, compared exactly as stored
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Opaque hash produced by the configured password hasher
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub email_verified: bool,
    pub email_verification_token: Option<String>,
    pub two_factor_enabled: bool,
    pub two_factor_secret: Option<String>,
}

impl User {
    /// Copy with the password hash and second-factor secret replaced.
    pub fn redacted(&self) -> Self {
        Self {
            password_hash: REDACTED_PASSWORD_HASH.to_string(),
            two_factor_secret: self
                .two_factor_secret
                .as_ref()
                .map(|_| REDACTED_PASSWORD_HASH.to_string()),
            ..self.clone()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: "u-1".into(),
            email: "jane@example.com".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            password_hash: "$2b$04$realhash".into(),
            role: UserRole::Moderator,
            created_at: Utc::now(),
            last_login: None,
            is_active: true,
            email_verified: false,
            email_verification_token: Some("verify-me".into()),
            two_factor_enabled: true,
            two_factor_secret: Some("JBSWY3DPEHPK3PXP".into()),
        }
    }

    #[test]
    fn redacted_hides_secrets_only() {
        let user = sample_user();
        let shown = user.redacted();

        assert_eq!(shown.password_hash, REDACTED_PASSWORD_HASH);
        assert_eq!(shown.two_factor_secret.as_deref(), Some(REDACTED_PASSWORD_HASH));
        assert_eq!(shown.email, user.email);
        assert_eq!(shown.role, UserRole::Moderator);
        assert_eq!(user.password_hash, "$2b$04$realhash");
    }

    #[test]
    fn role_string_roundtrip() {
        for role in [UserRole::Admin, UserRole::Moderator, UserRole::User] {
            assert_eq!(UserRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::from_str("root"), None);
        assert_eq!(UserRole::default(), UserRole::User);
    }

    #[test]
    fn full_name_joins_parts() {
        assert_eq!(sample_user().full_name(), "Jane Doe");
    }
}
