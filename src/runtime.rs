//! Auth runtime lifecycle
//!
//! [`AuthRuntime`] wires the in-memory store, the rate limiter and its
//! cleanup task, and the [`AuthService`] into one handle with a graceful
//! shutdown. The binary and embedding applications both start through it.

use std::sync::Arc;

use chrono::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::identity::{AuthService, AuthSettings};
use crate::application::ports::{HashError, PasswordHasher};
use crate::application::rate_limit::{start_rate_limit_cleanup_task, RateLimiter, SharedRateLimiter};
use crate::config::{AppConfig, ConfigError};
use crate::domain::{CreateUserDto, DomainError, RepositoryProvider, UserRole};
use crate::infrastructure::crypto::{BcryptPasswordHasher, JwtConfig};
use crate::infrastructure::{InMemoryRepositoryProvider, LoggingNotifier};
use crate::shared::{ShutdownSignal, SharedClock, SystemClock};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to seed admin account: {0}")]
    Seed(String),
}

impl From<DomainError> for RuntimeError {
    fn from(e: DomainError) -> Self {
        RuntimeError::Seed(e.to_string())
    }
}

impl From<HashError> for RuntimeError {
    fn from(e: HashError) -> Self {
        RuntimeError::Seed(e.to_string())
    }
}

// ── Options ────────────────────────────────────────────────────────

pub struct RuntimeOptions {
    pub config: AppConfig,
    /// Create the configured admin account if the store is empty (default: true).
    pub seed_admin: bool,
    /// Time source for the store, limiter and tokens (default: system clock).
    pub clock: SharedClock,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            seed_admin: true,
            clock: SystemClock::shared(),
        }
    }
}

// ── AuthRuntime ────────────────────────────────────────────────────

/// Handle to a running auth backend.
pub struct AuthRuntime {
    pub repos: Arc<dyn RepositoryProvider>,
    pub rate_limiter: SharedRateLimiter,
    pub auth: Arc<AuthService>,
    /// The configuration the runtime was started with.
    pub config: AppConfig,

    shutdown: ShutdownSignal,
    cleanup_task: JoinHandle<()>,
}

impl AuthRuntime {
    /// Validate config, seed the admin account and start the cleanup task.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start(opts: RuntimeOptions) -> Result<Self, RuntimeError> {
        let config = opts.config;
        config.validate()?;

        info!("Starting auth-guard...");

        let clock = opts.clock;
        let repos: Arc<dyn RepositoryProvider> = InMemoryRepositoryProvider::shared(clock.clone());
        let rate_limiter = RateLimiter::shared(clock.clone());
        let hasher: Arc<dyn PasswordHasher> =
            Arc::new(BcryptPasswordHasher::new(config.security.bcrypt_cost));

        if opts.seed_admin {
            create_default_admin(repos.as_ref(), hasher.as_ref(), &config).await?;
        }

        let settings = AuthSettings {
            jwt: JwtConfig {
                secret: config.security.jwt_secret.clone(),
                expiration_minutes: config.security.access_token_ttl_minutes,
                issuer: "auth-guard".to_string(),
            },
            refresh_token_ttl: Duration::days(config.security.refresh_token_ttl_days),
            password_reset_ttl: Duration::minutes(config.security.password_reset_ttl_minutes),
        };
        info!(
            access_ttl_minutes = settings.jwt.expiration_minutes,
            refresh_ttl_days = config.security.refresh_token_ttl_days,
            "Token lifetimes configured"
        );

        let auth = Arc::new(AuthService::new(
            repos.clone(),
            rate_limiter.clone(),
            hasher,
            Arc::new(LoggingNotifier::new(config.app.public_url.clone())),
            clock,
            settings,
        ));

        // ── Background tasks ───────────────────────────────────
        let shutdown = ShutdownSignal::new();
        let cleanup_task = start_rate_limit_cleanup_task(
            rate_limiter.clone(),
            shutdown.clone(),
            std::time::Duration::from_secs(config.rate_limit.cleanup_interval_secs),
        );

        info!("auth-guard started");

        Ok(Self {
            repos,
            rate_limiter,
            auth,
            config,
            shutdown,
            cleanup_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.cleanup_task.is_finished()
    }

    /// Trigger shutdown and wait for background tasks to stop.
    pub async fn shutdown(self) {
        info!("Shutting down auth-guard...");
        self.shutdown.trigger();

        if let Err(e) = self.cleanup_task.await {
            error!("Rate limit cleanup task panicked: {}", e);
        }

        info!("auth-guard shutdown complete");
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Create the configured admin account if no users exist.
async fn create_default_admin(
    repos: &dyn RepositoryProvider,
    hasher: &dyn PasswordHasher,
    config: &AppConfig,
) -> Result<(), RuntimeError> {
    if repos.users().count().await? > 0 {
        return Ok(());
    }

    info!("Creating default admin user...");

    let admin = &config.admin;
    let password_hash = hasher.hash(&admin.password)?;

    let mut dto = CreateUserDto::new(
        admin.email.trim().to_lowercase(),
        admin.first_name.clone(),
        admin.last_name.clone(),
        password_hash,
    );
    dto.role = UserRole::Admin;
    dto.email_verified = true;

    let user = repos.users().create(dto).await?;
    info!(user_id = %user.id, email = %user.email, "Default admin created");
    warn!("Please change the default admin password immediately");
    Ok(())
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`AuthRuntime::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::identity::ClientContext;

    fn test_options() -> RuntimeOptions {
        let mut config = AppConfig::default();
        config.security.bcrypt_cost = 4;
        config.security.jwt_secret = "test-secret".into();
        RuntimeOptions {
            config,
            ..RuntimeOptions::default()
        }
    }

    #[tokio::test]
    async fn seeds_admin_once_and_shuts_down() {
        let opts = test_options();
        let admin_email = opts.config.admin.email.clone();
        let admin_password = opts.config.admin.password.clone();

        let runtime = AuthRuntime::start(opts).await.unwrap();
        assert!(runtime.is_running());

        let admin = runtime
            .repos
            .users()
            .find_by_email(&admin_email)
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_admin());
        assert!(admin.email_verified);

        create_default_admin(
            runtime.repos.as_ref(),
            &BcryptPasswordHasher::new(4),
            &runtime.config,
        )
        .await
        .unwrap();
        assert_eq!(runtime.repos.users().count().await.unwrap(), 1);

        let session = runtime
            .auth
            .login(&admin_email, &admin_password, &ClientContext::new("127.0.0.1", "test"))
            .await
            .unwrap();
        assert!(runtime.auth.authenticate(&session.access_token).unwrap().is_admin());

        let signal = runtime.shutdown_signal();
        runtime.shutdown().await;
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn rejects_invalid_config() {
        let mut opts = test_options();
        opts.config.security.jwt_secret.clear();
        opts.seed_admin = false;

        let result = AuthRuntime::start(opts).await;
        assert!(matches!(result, Err(RuntimeError::Config(_))));
    }

    #[tokio::test]
    async fn refuses_placeholder_secret() {
        let opts = RuntimeOptions {
            seed_admin: false,
            ..RuntimeOptions::default()
        };

        let result = AuthRuntime::start(opts).await;
        assert!(matches!(result, Err(RuntimeError::Config(_))));
    }
}
