//! Rate limit actions, policies and decisions

use serde::{Deserialize, Serialize};

const MINUTE_MS: i64 = 60 * 1000;

/// Actions guarded by the rate limiter.
///
/// Each variant has exactly one policy in [`RateLimitAction::policy`];
/// adding a variant without a policy does not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RateLimitAction {
    Login,
    ForgotPassword,
    Register,
}

impl RateLimitAction {
    pub const ALL: [Self; 3] = [Self::Login, Self::ForgotPassword, Self::Register];

    /// Key prefix. Never contains `:`, which separates it from the
    /// identifier in the attempt table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::ForgotPassword => "forgot-password",
            Self::Register => "register",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "login" => Some(Self::Login),
            "forgot-password" => Some(Self::ForgotPassword),
            "register" => Some(Self::Register),
            _ => None,
        }
    }

    pub fn policy(&self) -> RateLimitPolicy {
        match self {
            Self::Login => RateLimitPolicy::new(5, 15 * MINUTE_MS),
            Self::ForgotPassword => RateLimitPolicy::new(3, 60 * MINUTE_MS),
            Self::Register => RateLimitPolicy::new(3, 60 * MINUTE_MS),
        }
    }
}

impl std::fmt::Display for RateLimitAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attempts admitted per fixed window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_attempts: u32,
    pub window_ms: i64,
}

impl RateLimitPolicy {
    pub const fn new(max_attempts: u32, window_ms: i64) -> Self {
        Self {
            max_attempts,
            window_ms,
        }
    }

    pub fn window_secs(&self) -> u64 {
        (self.window_ms / 1000) as u64
    }
}

/// Counter for one `action:identifier` key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    /// Attempts observed in the current window
    pub count: u32,
    /// Epoch milliseconds at which the window ends
    pub reset_time: i64,
}

impl RateLimitEntry {
    /// First attempt of a new window.
    pub fn start(now_ms: i64, policy: RateLimitPolicy) -> Self {
        Self {
            count: 1,
            reset_time: now_ms + policy.window_ms,
        }
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms > self.reset_time
    }
}

/// Outcome of a rate limit check. A deny is a normal value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Seconds until the window resets; set only when denied
    pub retry_after_secs: Option<u64>,
}

impl RateLimitDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            retry_after_secs: None,
        }
    }

    pub fn deny(retry_after_secs: u64) -> Self {
        Self {
            allowed: false,
            retry_after_secs: Some(retry_after_secs),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policies_match_reference_table() {
        assert_eq!(RateLimitAction::Login.policy(), RateLimitPolicy::new(5, 900_000));
        assert_eq!(RateLimitAction::ForgotPassword.policy(), RateLimitPolicy::new(3, 3_600_000));
        assert_eq!(RateLimitAction::Register.policy(), RateLimitPolicy::new(3, 3_600_000));
        assert_eq!(RateLimitAction::Login.policy().window_secs(), 900);
    }

    #[test]
    fn action_names_never_contain_separator() {
        for action in RateLimitAction::ALL {
            assert!(!action.as_str().contains(':'));
            assert_eq!(RateLimitAction::from_str(action.as_str()), Some(action));
        }
        assert_eq!(RateLimitAction::from_str("delete-account"), None);
    }

    #[test]
    fn entry_window_boundary_is_inclusive() {
        let entry = RateLimitEntry::start(1_000, RateLimitAction::Login.policy());
        assert_eq!(entry.count, 1);
        assert_eq!(entry.reset_time, 901_000);
        assert!(!entry.is_expired_at(901_000));
        assert!(entry.is_expired_at(901_001));
    }
}
