//! In-memory account store
//!
//! Every collection is safe for concurrent request handlers: users and
//! tokens live in `DashMap`s whose per-shard locks make each
//! find-then-mutate atomic, and the append-only login log sits behind a
//! `RwLock`.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::{
    CreateLoginLogDto, CreatePasswordResetTokenDto, CreateRefreshTokenDto, CreateUserDto,
    DomainError, DomainResult, LoginLog, LoginLogRepository, PasswordResetToken,
    PasswordResetTokenRepository, RefreshToken, RefreshTokenRepository, RepositoryProvider,
    UpdateProfileDto, User, UserRepository,
};
use crate::infrastructure::crypto::{generate_id, token_preview};
use crate::shared::SharedClock;

// ── Provider ───────────────────────────────────────────────────

/// In-memory [`RepositoryProvider`] for development, tests and
/// single-process deployments. Nothing survives a restart.
pub struct InMemoryRepositoryProvider {
    users: InMemoryUserRepository,
    login_logs: InMemoryLoginLogRepository,
    refresh_tokens: InMemoryRefreshTokenRepository,
    password_reset_tokens: InMemoryPasswordResetTokenRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            users: InMemoryUserRepository::new(clock.clone()),
            login_logs: InMemoryLoginLogRepository::new(clock.clone()),
            refresh_tokens: InMemoryRefreshTokenRepository::new(clock.clone()),
            password_reset_tokens: InMemoryPasswordResetTokenRepository::new(clock),
        }
    }

    pub fn shared(clock: SharedClock) -> Arc<Self> {
        Arc::new(Self::new(clock))
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn login_logs(&self) -> &dyn LoginLogRepository {
        &self.login_logs
    }

    fn refresh_tokens(&self) -> &dyn RefreshTokenRepository {
        &self.refresh_tokens
    }

    fn password_reset_tokens(&self) -> &dyn PasswordResetTokenRepository {
        &self.password_reset_tokens
    }
}

// ── Users ──────────────────────────────────────────────────────

pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
    clock: SharedClock,
}

impl InMemoryUserRepository {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            users: DashMap::new(),
            clock,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        // Duplicates only exist if a caller skipped the uniqueness check;
        // the oldest record wins.
        Ok(self
            .users
            .iter()
            .filter(|u| u.email == email)
            .map(|u| u.value().clone())
            .min_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id))))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn find_by_verification_token(&self, token: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email_verification_token.as_deref() == Some(token))
            .map(|u| u.value().clone()))
    }

    async fn create(&self, dto: CreateUserDto) -> DomainResult<User> {
        let user = User {
            id: generate_id(),
            email: dto.email,
            first_name: dto.first_name,
            last_name: dto.last_name,
            password_hash: dto.password_hash,
            role: dto.role,
            created_at: self.clock.now(),
            last_login: None,
            is_active: dto.is_active,
            email_verified: dto.email_verified,
            email_verification_token: dto.email_verification_token,
            two_factor_enabled: dto.two_factor_enabled,
            two_factor_secret: dto.two_factor_secret,
        };

        self.users.insert(user.id.clone(), user.clone());
        info!(user_id = %user.id, email = %user.email, role = %user.role, "User created");
        Ok(user)
    }

    async fn update_last_login(&self, id: &str) -> DomainResult<()> {
        if let Some(mut user) = self.users.get_mut(id) {
            user.last_login = Some(self.clock.now());
        }
        Ok(())
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> DomainResult<()> {
        if let Some(mut user) = self.users.get_mut(id) {
            user.password_hash = password_hash.to_string();
            info!(user_id = id, "Password updated");
        }
        Ok(())
    }

    async fn update_profile(&self, id: &str, dto: UpdateProfileDto) -> DomainResult<Option<User>> {
        Ok(self.users.get_mut(id).map(|mut user| {
            user.first_name = dto.first_name;
            user.last_name = dto.last_name;
            info!(user_id = id, "Profile updated");
            user.clone()
        }))
    }

    async fn mark_email_verified(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get_mut(id).map(|mut user| {
            user.email_verified = true;
            user.email_verification_token = None;
            info!(user_id = id, "Email verified");
            user.clone()
        }))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.redacted()).collect();
        users.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(users)
    }

    async fn delete(&self, id: &str) -> DomainResult<Option<User>> {
        let removed = self.users.remove(id).map(|(_, user)| user);
        if let Some(user) = &removed {
            info!(user_id = %user.id, email = %user.email, "User deleted");
        }
        Ok(removed)
    }

    async fn count(&self) -> DomainResult<usize> {
        Ok(self.users.len())
    }
}

// ── Login logs ─────────────────────────────────────────────────

pub struct InMemoryLoginLogRepository {
    /// Newest first
    logs: RwLock<VecDeque<LoginLog>>,
    clock: SharedClock,
}

impl InMemoryLoginLogRepository {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            logs: RwLock::new(VecDeque::new()),
            clock,
        }
    }
}

fn newest_first(logs: &mut [LoginLog]) {
    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[async_trait]
impl LoginLogRepository for InMemoryLoginLogRepository {
    async fn create(&self, dto: CreateLoginLogDto) -> DomainResult<LoginLog> {
        let log = LoginLog {
            id: generate_id(),
            user_id: dto.user_id,
            user_email: dto.user_email,
            ip: dto.ip,
            user_agent: dto.user_agent,
            timestamp: self.clock.now(),
            success: dto.success,
            reason: dto.reason,
        };

        self.logs.write().await.push_front(log.clone());
        debug!(
            email = %log.user_email,
            ip = %log.ip,
            success = log.success,
            "Login attempt recorded"
        );
        Ok(log)
    }

    async fn find_by_user(&self, user_id: &str) -> DomainResult<Vec<LoginLog>> {
        let mut logs: Vec<LoginLog> = self
            .logs
            .read()
            .await
            .iter()
            .filter(|log| log.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut logs);
        Ok(logs)
    }

    async fn find_all(&self) -> DomainResult<Vec<LoginLog>> {
        let mut logs: Vec<LoginLog> = self.logs.read().await.iter().cloned().collect();
        newest_first(&mut logs);
        Ok(logs)
    }
}

// ── Refresh tokens ─────────────────────────────────────────────

pub struct InMemoryRefreshTokenRepository {
    /// Keyed by token value
    tokens: DashMap<String, RefreshToken>,
    clock: SharedClock,
}

impl InMemoryRefreshTokenRepository {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            tokens: DashMap::new(),
            clock,
        }
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, dto: CreateRefreshTokenDto) -> DomainResult<RefreshToken> {
        match self.tokens.entry(dto.token.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "refresh token {}",
                token_preview(&dto.token)
            ))),
            Entry::Vacant(slot) => {
                let token = RefreshToken {
                    id: generate_id(),
                    user_id: dto.user_id,
                    token: dto.token,
                    ip: dto.ip,
                    user_agent: dto.user_agent,
                    created_at: self.clock.now(),
                    expires_at: dto.expires_at,
                    revoked: false,
                };
                slot.insert(token.clone());
                debug!(user_id = %token.user_id, token = %token_preview(&token.token), "Refresh token issued");
                Ok(token)
            }
        }
    }

    async fn find_by_token(&self, token: &str) -> DomainResult<Option<RefreshToken>> {
        Ok(self.tokens.get(token).map(|t| t.clone()))
    }

    async fn revoke(&self, token: &str) -> DomainResult<bool> {
        let Some(mut stored) = self.tokens.get_mut(token) else {
            return Ok(false);
        };
        if stored.revoked {
            return Ok(false);
        }
        stored.revoked = true;
        info!(user_id = %stored.user_id, token = %token_preview(token), "Refresh token revoked");
        Ok(true)
    }

    async fn revoke_all_for_user(&self, user_id: &str) -> DomainResult<usize> {
        let mut revoked = 0;
        for mut stored in self.tokens.iter_mut() {
            if stored.user_id == user_id && !stored.revoked {
                stored.revoked = true;
                revoked += 1;
            }
        }
        if revoked > 0 {
            info!(user_id, count = revoked, "Refresh tokens revoked");
        }
        Ok(revoked)
    }
}

// ── Password reset tokens ──────────────────────────────────────

pub struct InMemoryPasswordResetTokenRepository {
    /// Keyed by record id
    tokens: DashMap<String, PasswordResetToken>,
    clock: SharedClock,
}

impl InMemoryPasswordResetTokenRepository {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            tokens: DashMap::new(),
            clock,
        }
    }
}

#[async_trait]
impl PasswordResetTokenRepository for InMemoryPasswordResetTokenRepository {
    async fn create(&self, dto: CreatePasswordResetTokenDto) -> DomainResult<PasswordResetToken> {
        let token = PasswordResetToken {
            id: generate_id(),
            user_id: dto.user_id,
            token: dto.token,
            created_at: self.clock.now(),
            expires_at: dto.expires_at,
            used: false,
        };

        self.tokens.insert(token.id.clone(), token.clone());
        info!(user_id = %token.user_id, "Password reset token created");
        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> DomainResult<Option<PasswordResetToken>> {
        Ok(self
            .tokens
            .iter()
            .find(|t| t.token == token)
            .map(|t| t.value().clone()))
    }

    async fn mark_as_used(&self, id: &str) -> DomainResult<bool> {
        let Some(mut token) = self.tokens.get_mut(id) else {
            return Ok(false);
        };
        if token.used {
            return Ok(false);
        }
        token.used = true;
        info!(token_id = id, user_id = %token.user_id, "Password reset token consumed");
        Ok(true)
    }
}

// ── Tests ──────────────────────────────────────────────────────
