//! Fixed-window attempt counter per `(action, identifier)`
//!
//! Increment-then-check: the attempt that crosses an action's limit is
//! itself counted and denied, so with `max_attempts = 5` the sixth call in
//! a window is the first refusal.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::domain::{RateLimitAction, RateLimitDecision, RateLimitEntry};
use crate::shared::SharedClock;

pub type SharedRateLimiter = Arc<RateLimiter>;

/// In-process rate limiter. Counters are not shared across instances.
pub struct RateLimiter {
    attempts: DashMap<String, RateLimitEntry>,
    clock: SharedClock,
}

impl RateLimiter {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            attempts: DashMap::new(),
            clock,
        }
    }

    pub fn shared(clock: SharedClock) -> SharedRateLimiter {
        Arc::new(Self::new(clock))
    }

    fn key(action: RateLimitAction, identifier: &str) -> String {
        format!("{}:{}", action.as_str(), identifier)
    }

    /// Record an attempt and decide whether it is admitted.
    ///
    /// The read-increment-write for one key runs under the map's shard
    /// lock, so concurrent checks on the same key never lose updates.
    pub fn check(&self, identifier: &str, action: RateLimitAction) -> RateLimitDecision {
        let policy = action.policy();
        let now = self.clock.now_millis();

        match self.attempts.entry(Self::key(action, identifier)) {
            Entry::Vacant(slot) => {
                slot.insert(RateLimitEntry::start(now, policy));
                RateLimitDecision::allow()
            }
            Entry::Occupied(mut slot) => {
                let entry = slot.get_mut();

                if entry.is_expired_at(now) {
                    *entry = RateLimitEntry::start(now, policy);
                    return RateLimitDecision::allow();
                }

                entry.count = entry.count.saturating_add(1);
                if entry.count <= policy.max_attempts {
                    return RateLimitDecision::allow();
                }

                // The window closes strictly after `reset_time`, so a caller
                // waiting exactly the hint on a whole-second boundary is
                // refused once more with a 1s hint.
                let remaining_ms = (entry.reset_time - now).max(0);
                let retry_after_secs = ((remaining_ms + 999) / 1000).max(1) as u64;

                warn!(
                    action = action.as_str(),
                    identifier,
                    attempts = entry.count,
                    retry_after_secs,
                    "Rate limit exceeded"
                );
                metrics::counter!("auth_rate_limit_denied_total", "action" => action.as_str())
                    .increment(1);

                RateLimitDecision::deny(retry_after_secs)
            }
        }
    }

    /// Drop every entry whose window has ended. Returns the number removed.
    pub fn cleanup(&self) -> usize {
        let now = self.clock.now_millis();
        let mut removed = 0;

        self.attempts.retain(|_, entry| {
            let keep = !entry.is_expired_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });

        if removed > 0 {
            debug!(removed, remaining = self.attempts.len(), "Expired rate limit entries removed");
        }
        removed
    }

    /// Attempts counted in the current window, if the key is tracked.
    pub fn attempts(&self, identifier: &str, action: RateLimitAction) -> Option<u32> {
        self.attempts
            .get(&Self::key(action, identifier))
            .map(|entry| entry.count)
    }

    /// Number of tracked keys, expired or not.
    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}
