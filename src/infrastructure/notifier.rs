//! Notifier adapter that writes outgoing mail to the log
//!
//! Stands in for an SMTP transport. Logged links carry a token preview,
//! never the live token.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::application::ports::Notifier;
use crate::infrastructure::crypto::token_preview;

pub struct LoggingNotifier {
    public_url: String,
}

impl LoggingNotifier {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn link(&self, path: &str, token: &str) -> String {
        format!("{}{}?token={}", self.public_url, path, token)
    }

    fn redacted_link(&self, path: &str, token: &str) -> String {
        self.link(path, &token_preview(token))
    }
}

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn send_verification_email(&self, email: &str, token: &str) {
        info!(to = email, token = %token_preview(token), "Sending verification email");
        debug!(link = %self.redacted_link("/auth/verify-email", token), "Verification link");
    }

    async fn send_password_reset_email(&self, email: &str, token: &str) {
        info!(to = email, token = %token_preview(token), "Sending password reset email");
        debug!(link = %self.redacted_link("/auth/reset-password", token), "Password reset link");
    }

    async fn send_welcome_email(&self, email: &str, first_name: &str) {
        info!(to = email, first_name, "Sending welcome email");
    }

    async fn send_security_alert(&self, email: &str, action: &str, ip: &str) {
        warn!(to = email, action, ip, "Sending security alert");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_drop_trailing_slash() {
        let notifier = LoggingNotifier::new("https://auth.example.com/");
        assert_eq!(
            notifier.link("/auth/verify-email", "abc"),
            "https://auth.example.com/auth/verify-email?token=abc"
        );
    }

    #[test]
    fn logged_links_never_carry_the_full_token() {
        let notifier = LoggingNotifier::new("https://auth.example.com");
        let token = "0123456789abcdef0123456789abcdef";
        let link = notifier.redacted_link("/auth/reset-password", token);
        assert!(link.starts_with("https://auth.example.com/auth/reset-password?token="));
        assert!(!link.contains(token));
        assert!(link.ends_with("..."));
    }

    #[tokio::test]
    async fn sending_never_fails() {
        let notifier = LoggingNotifier::new("http://localhost:3000");
        notifier.send_password_reset_email("a@example.com", "token").await;
        notifier.send_security_alert("a@example.com", "password_reset", "10.0.0.1").await;
    }
}
