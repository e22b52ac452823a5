//! Authentication service: application-layer orchestration
//!
//! Every brute-force-prone flow asks the rate limiter first; a denied
//! attempt returns before any store read or write. Store preconditions the
//! repositories leave to callers (unique email, single-use reset tokens,
//! refresh token expiry) are enforced here.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use tracing::{debug, info, warn};
use validator::Validate;

use super::requests::{
    normalize_email, ChangePasswordRequest, RegisterRequest, ResetPasswordRequest,
    UpdateProfileRequest,
};
use super::AuthError;
use crate::application::ports::{Notifier, PasswordHasher};
use crate::application::rate_limit::SharedRateLimiter;
use crate::domain::{
    CreateLoginLogDto, CreatePasswordResetTokenDto, CreateRefreshTokenDto, CreateUserDto,
    LoginLog, RateLimitAction, RepositoryProvider, UpdateProfileDto, User,
};
use crate::infrastructure::crypto::{
    create_access_token, generate_opaque_token, token_preview, verify_access_token, AccessClaims,
    JwtConfig,
};
use crate::shared::SharedClock;

/// Token lifetimes
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt: JwtConfig,
    pub refresh_token_ttl: Duration,
    pub password_reset_ttl: Duration,
}

/// Where a request came from. `ip` scopes the login and register limits.
#[derive(Debug, Clone)]
pub struct ClientContext {
    pub ip: String,
    pub user_agent: String,
}

impl ClientContext {
    pub fn new(ip: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            user_agent: user_agent.into(),
        }
    }
}

/// Tokens returned after login or refresh
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub refresh_token: String,
    pub refresh_expires_at: chrono::DateTime<chrono::Utc>,
    /// Redacted user record
    pub user: User,
}

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    rate_limiter: SharedRateLimiter,
    hasher: Arc<dyn PasswordHasher>,
    notifier: Arc<dyn Notifier>,
    clock: SharedClock,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        rate_limiter: SharedRateLimiter,
        hasher: Arc<dyn PasswordHasher>,
        notifier: Arc<dyn Notifier>,
        clock: SharedClock,
        settings: AuthSettings,
    ) -> Self {
        Self {
            repos,
            rate_limiter,
            hasher,
            notifier,
            clock,
            settings,
        }
    }

    fn guard(&self, identifier: &str, action: RateLimitAction) -> Result<(), AuthError> {
        let decision = self.rate_limiter.check(identifier, action);
        if decision.is_allowed() {
            return Ok(());
        }
        Err(AuthError::RateLimited {
            action,
            retry_after_secs: decision.retry_after_secs.unwrap_or(1),
        })
    }

    async fn record_login(&self, dto: CreateLoginLogDto) -> Result<(), AuthError> {
        let outcome = if dto.success { "success" } else { "failure" };
        metrics::counter!("auth_login_attempts_total", "outcome" => outcome).increment(1);
        self.repos.login_logs().create(dto).await?;
        Ok(())
    }

    async fn issue_session(&self, user: &User, client: &ClientContext) -> Result<AuthSession, AuthError> {
        let now = self.clock.now();

        let access_token = create_access_token(user, &self.settings.jwt, now)
            .map_err(|e| AuthError::TokenIssue(e.to_string()))?;

        let refresh = self
            .repos
            .refresh_tokens()
            .create(CreateRefreshTokenDto {
                user_id: user.id.clone(),
                token: generate_opaque_token(),
                ip: client.ip.clone(),
                user_agent: client.user_agent.clone(),
                expires_at: now + self.settings.refresh_token_ttl,
            })
            .await?;

        Ok(AuthSession {
            access_token,
            token_type: "Bearer".into(),
            expires_in: self.settings.jwt.expires_in_secs(),
            refresh_token: refresh.token,
            refresh_expires_at: refresh.expires_at,
            user: user.redacted(),
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Create an unverified account and send the verification link.
    pub async fn register(
        &self,
        request: RegisterRequest,
        client: &ClientContext,
    ) -> Result<User, AuthError> {
        self.guard(&client.ip, RateLimitAction::Register)?;

        let request = request.normalized();
        request.validate()?;

        if self.repos.users().find_by_email(&request.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let verification_token = generate_opaque_token();

        let mut dto = CreateUserDto::new(
            request.email,
            request.first_name,
            request.last_name,
            password_hash,
        );
        dto.email_verification_token = Some(verification_token.clone());

        let user = self.repos.users().create(dto).await?;

        self.notifier
            .send_verification_email(&user.email, &verification_token)
            .await;
        self.notifier
            .send_welcome_email(&user.email, &user.first_name)
            .await;

        info!(user_id = %user.id, ip = %client.ip, "New user registered");
        Ok(user.redacted())
    }

    /// Consume an email verification token.
    pub async fn verify_email(&self, token: &str) -> Result<User, AuthError> {
        let user = self
            .repos
            .users()
            .find_by_verification_token(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let verified = self
            .repos
            .users()
            .mark_email_verified(&user.id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Ok(verified.redacted())
    }

    // ── Sessions ────────────────────────────────────────────────

    /// Check credentials and open a session. Every admitted attempt is
    /// written to the login log, whatever its outcome.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client: &ClientContext,
    ) -> Result<AuthSession, AuthError> {
        self.guard(&client.ip, RateLimitAction::Login)?;

        let email = normalize_email(email);

        let Some(user) = self.repos.users().find_by_email(&email).await? else {
            self.record_login(CreateLoginLogDto::unknown_user(
                &email,
                &client.ip,
                &client.user_agent,
            ))
            .await?;
            return Err(AuthError::InvalidCredentials);
        };

        if !user.is_active {
            self.record_login(CreateLoginLogDto::failure(
                &user.id,
                &email,
                &client.ip,
                &client.user_agent,
                "Account disabled",
            ))
            .await?;
            return Err(AuthError::AccountDisabled);
        }

        let valid = self
            .hasher
            .verify(password, &user.password_hash)
            .unwrap_or_else(|e| {
                warn!(user_id = %user.id, error = %e, "Stored password hash could not be verified");
                false
            });
        if !valid {
            self.record_login(CreateLoginLogDto::failure(
                &user.id,
                &email,
                &client.ip,
                &client.user_agent,
                "Invalid password",
            ))
            .await?;
            return Err(AuthError::InvalidCredentials);
        }

        self.repos.users().update_last_login(&user.id).await?;
        self.record_login(CreateLoginLogDto::success(
            &user.id,
            &email,
            &client.ip,
            &client.user_agent,
        ))
        .await?;

        let user = self
            .repos
            .users()
            .find_by_id(&user.id)
            .await?
            .unwrap_or(user);
        let session = self.issue_session(&user, client).await?;

        info!(user_id = %user.id, ip = %client.ip, "User logged in");
        Ok(session)
    }

    /// Exchange a live refresh token for a new session. The presented
    /// token is revoked (rotation).
    pub async fn refresh(
        &self,
        refresh_token: &str,
        client: &ClientContext,
    ) -> Result<AuthSession, AuthError> {
        let stored = self
            .repos
            .refresh_tokens()
            .find_by_token(refresh_token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if stored.revoked {
            warn!(
                user_id = %stored.user_id,
                token = %token_preview(refresh_token),
                ip = %client.ip,
                "Revoked refresh token presented"
            );
            return Err(AuthError::InvalidToken);
        }
        if stored.is_expired_at(self.clock.now()) {
            return Err(AuthError::TokenExpired);
        }

        let user = match self.repos.users().find_by_id(&stored.user_id).await? {
            Some(user) if user.is_active => user,
            _ => {
                self.repos.refresh_tokens().revoke(refresh_token).await?;
                return Err(AuthError::InvalidToken);
            }
        };

        // Only the caller that flips `revoked` may rotate the token
        if !self.repos.refresh_tokens().revoke(refresh_token).await? {
            warn!(
                user_id = %user.id,
                token = %token_preview(refresh_token),
                ip = %client.ip,
                "Refresh token already rotated"
            );
            return Err(AuthError::InvalidToken);
        }
        self.issue_session(&user, client).await
    }

    /// Revoke a refresh token. Unknown or already revoked tokens are fine.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.repos.refresh_tokens().revoke(refresh_token).await?;
        Ok(())
    }

    /// Decode and validate an access token.
    pub fn authenticate(&self, access_token: &str) -> Result<AccessClaims, AuthError> {
        verify_access_token(access_token, &self.settings.jwt, self.clock.now()).map_err(|e| {
            debug!(error = %e, "Access token rejected");
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })
    }

    // ── Password recovery ───────────────────────────────────────

    /// Start password recovery. Succeeds whether or not the email is
    /// registered so the response never reveals which accounts exist.
    pub async fn forgot_password(&self, email: &str, client: &ClientContext) -> Result<(), AuthError> {
        let email = normalize_email(email);
        self.guard(&email, RateLimitAction::ForgotPassword)?;

        let user = match self.repos.users().find_by_email(&email).await? {
            Some(user) if user.is_active => user,
            Some(user) => {
                debug!(user_id = %user.id, "Password reset skipped for disabled account");
                return Ok(());
            }
            None => {
                debug!(ip = %client.ip, "Password reset requested for unknown email");
                return Ok(());
            }
        };

        let reset = self
            .repos
            .password_reset_tokens()
            .create(CreatePasswordResetTokenDto {
                user_id: user.id.clone(),
                token: generate_opaque_token(),
                expires_at: self.clock.now() + self.settings.password_reset_ttl,
            })
            .await?;

        self.notifier
            .send_password_reset_email(&user.email, &reset.token)
            .await;
        Ok(())
    }

    /// Set a new password with a reset token. The token is consumed once;
    /// every refresh token of the user is revoked.
    pub async fn reset_password(
        &self,
        request: ResetPasswordRequest,
        client: &ClientContext,
    ) -> Result<(), AuthError> {
        request.validate()?;

        let stored = self
            .repos
            .password_reset_tokens()
            .find_by_token(&request.token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if stored.used {
            warn!(token_id = %stored.id, ip = %client.ip, "Used password reset token presented");
            return Err(AuthError::InvalidToken);
        }
        if stored.is_expired_at(self.clock.now()) {
            return Err(AuthError::TokenExpired);
        }

        let user = self
            .repos
            .users()
            .find_by_id(&stored.user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let password_hash = self.hasher.hash(&request.new_password)?;

        // Only the caller that flips `used` may proceed
        if !self
            .repos
            .password_reset_tokens()
            .mark_as_used(&stored.id)
            .await?
        {
            return Err(AuthError::InvalidToken);
        }

        self.repos
            .users()
            .update_password(&user.id, &password_hash)
            .await?;
        self.repos
            .refresh_tokens()
            .revoke_all_for_user(&user.id)
            .await?;
        self.notifier
            .send_security_alert(&user.email, "password_reset", &client.ip)
            .await;

        info!(user_id = %user.id, ip = %client.ip, "Password reset completed");
        Ok(())
    }

    // ── Profile ─────────────────────────────────────────────────

    /// Change password after re-checking the current one. Revokes every
    /// open session.
    pub async fn change_password(
        &self,
        user_id: &str,
        request: ChangePasswordRequest,
        client: &ClientContext,
    ) -> Result<(), AuthError> {
        request.validate()?;

        let user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(user_id.to_string()))?;

        let valid = self
            .hasher
            .verify(&request.current_password, &user.password_hash)
            .unwrap_or(false);
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let password_hash = self.hasher.hash(&request.new_password)?;
        self.repos
            .users()
            .update_password(user_id, &password_hash)
            .await?;
        self.repos
            .refresh_tokens()
            .revoke_all_for_user(user_id)
            .await?;
        self.notifier
            .send_security_alert(&user.email, "password_change", &client.ip)
            .await;

        info!(user_id, "Password changed");
        Ok(())
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
    ) -> Result<User, AuthError> {
        let request = request.normalized();
        request.validate()?;

        let dto = UpdateProfileDto {
            first_name: request.first_name,
            last_name: request.last_name,
        };
        self.repos
            .users()
            .update_profile(user_id, dto)
            .await?
            .map(|user| user.redacted())
            .ok_or_else(|| AuthError::UserNotFound(user_id.to_string()))
    }

    // ── Administration ──────────────────────────────────────────

    /// All users with password hashes redacted.
    pub async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.repos.users().find_all().await?)
    }

    pub async fn list_login_logs(&self) -> Result<Vec<LoginLog>, AuthError> {
        Ok(self.repos.login_logs().find_all().await?)
    }

    pub async fn login_history(&self, user_id: &str) -> Result<Vec<LoginLog>, AuthError> {
        Ok(self.repos.login_logs().find_by_user(user_id).await?)
    }

    /// Delete an account. Its sessions are revoked; login logs stay.
    pub async fn delete_user(&self, user_id: &str) -> Result<User, AuthError> {
        let removed = self
            .repos
            .users()
            .delete(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(user_id.to_string()))?;

        self.repos
            .refresh_tokens()
            .revoke_all_for_user(user_id)
            .await?;
        Ok(removed.redacted())
    }
}
