//! Background task that periodically evicts expired rate limit entries.
//!
//! Started once at runtime init; runs until the shutdown signal fires.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::SharedRateLimiter;
use crate::shared::ShutdownSignal;

/// Start the rate limit cleanup background task.
///
/// The first sweep happens one full `every` after start.
pub fn start_rate_limit_cleanup_task(
    limiter: SharedRateLimiter,
    shutdown: ShutdownSignal,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = every.as_secs(), "Rate limit cleanup task started");

        let start = tokio::time::Instant::now() + every;
        let mut interval = tokio::time::interval_at(start, every);
        let stopped = shutdown.notified().wait();
        tokio::pin!(stopped);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let removed = limiter.cleanup();
                    debug!(removed, tracked = limiter.len(), "Rate limit sweep finished");
                }
                _ = &mut stopped => {
                    break;
                }
            }
        }

        info!("Rate limit cleanup task stopped");
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration as ChronoDuration;

    use super::*;
    use crate::application::rate_limit::RateLimiter;
    use crate::domain::RateLimitAction;
    use crate::shared::ManualClock;

    #[tokio::test]
    async fn sweeps_expired_entries_until_shutdown() {
        let clock = ManualClock::starting_now();
        let limiter = Arc::new(RateLimiter::new(clock.clone()));
        let shutdown = ShutdownSignal::new();

        limiter.check("198.51.100.1", RateLimitAction::Login);
        clock.advance(ChronoDuration::minutes(16));
        limiter.check("198.51.100.2", RateLimitAction::Login);
        assert_eq!(limiter.len(), 2);

        let handle = start_rate_limit_cleanup_task(
            limiter.clone(),
            shutdown.clone(),
            Duration::from_millis(10),
        );

        let swept = tokio::time::timeout(Duration::from_secs(2), async {
            while limiter.len() != 1 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        assert!(swept.is_ok(), "expired entry should be evicted");
        assert_eq!(limiter.attempts("198.51.100.2", RateLimitAction::Login), Some(1));

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("task stops on shutdown")
            .expect("task did not panic");
    }
}
