//! Input accepted by the account flows
//!
//! Each request is normalized (trimmed, email lowercased) before its
//! `Validate` rules run.

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "first name must be 1-100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "last name must be 1-100 characters"))]
    pub last_name: String,
}

impl RegisterRequest {
    pub(crate) fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            password: self.password,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "first name must be 1-100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "last name must be 1-100 characters"))]
    pub last_name: String,
}

impl UpdateProfileRequest {
    pub(crate) fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "current password is required"))]
    pub current_password: String,
    #[validate(length(min = 8, max = 128, message = "new password must be 8-128 characters"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,
    #[validate(length(min = 8, max = 128, message = "new password must be 8-128 characters"))]
    pub new_password: String,
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            password: "correct horse".into(),
            first_name: " Jane ".into(),
            last_name: "Doe".into(),
        }
    }

    #[test]
    fn normalizes_before_validation() {
        let req = request("  Jane@Example.COM ").normalized();
        assert_eq!(req.email, "jane@example.com");
        assert_eq!(req.first_name, "Jane");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_markup_and_quotes_in_email() {
        for email in [
            "x<script>@example.com",
            "a\"b@example.com",
            "(x)@123abc",
            "no-at-sign",
            "@example.com",
            "jane@-bad.com",
        ] {
            assert!(request(email).normalized().validate().is_err(), "{email}");
        }
    }

    #[test]
    fn blank_names_fail_after_trimming() {
        let req = UpdateProfileRequest {
            first_name: "   ".into(),
            last_name: "Doe".into(),
        }
        .normalized();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
    }

    #[test]
    fn password_length_bounds() {
        let short = ChangePasswordRequest {
            current_password: "old".into(),
            new_password: "short".into(),
        };
        assert!(short.validate().is_err());

        let long = ResetPasswordRequest {
            token: "t".into(),
            new_password: "x".repeat(129),
        };
        assert!(long.validate().is_err());
    }
}
