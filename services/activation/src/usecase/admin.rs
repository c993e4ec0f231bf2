use anyhow::Context as _;
use chrono::Utc;
use uuid::Uuid;

use codegate_auth_types::password::{MIN_PASSWORD_LEN, hash_password, verify_password};
use codegate_auth_types::token::{IssuedToken, TokenSettings, issue_admin_token};

use crate::domain::repository::AdminRepository;
use crate::domain::types::AdminUser;
use crate::error::ActivationServiceError;

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

pub struct LoginUseCase<A>
where
    A: AdminRepository,
{
    pub admins: A,
    pub tokens: TokenSettings,
}

impl<A> LoginUseCase<A>
where
    A: AdminRepository,
{
    pub async fn execute(&self, input: LoginInput) -> Result<IssuedToken, ActivationServiceError> {
        // Unknown user and wrong password are indistinguishable to the caller.
        let admin = self
            .admins
            .find_by_username(&input.username)
            .await?
            .ok_or(ActivationServiceError::InvalidCredentials)?;

        let matches =
            verify_password(&input.password, &admin.password_hash).context("verify password")?;
        if !matches {
            tracing::warn!(username = %input.username, "admin login failed");
            return Err(ActivationServiceError::InvalidCredentials);
        }

        let issued = issue_admin_token(&admin.username, &self.tokens).context("issue token")?;
        tracing::info!(username = %admin.username, "admin logged in");
        Ok(issued)
    }
}

// ── Change password ──────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub username: String,
    pub old_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<A>
where
    A: AdminRepository,
{
    pub admins: A,
}

impl<A> ChangePasswordUseCase<A>
where
    A: AdminRepository,
{
    pub async fn execute(&self, input: ChangePasswordInput) -> Result<(), ActivationServiceError> {
        // 1. Reject weak passwords before any lookup
        if input.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ActivationServiceError::WeakPassword(MIN_PASSWORD_LEN));
        }

        // 2. The token may outlive its account
        let admin = self
            .admins
            .find_by_username(&input.username)
            .await?
            .ok_or(ActivationServiceError::InvalidCredentials)?;

        // 3. Old password must match
        if !verify_password(&input.old_password, &admin.password_hash)
            .context("verify password")?
        {
            return Err(ActivationServiceError::WrongPassword);
        }

        let hash = hash_password(&input.new_password).context("hash password")?;
        self.admins
            .update_password_hash(admin.id, &hash, Utc::now())
            .await?;
        tracing::info!(username = %admin.username, "admin password changed");
        Ok(())
    }
}

// ── Bootstrap ────────────────────────────────────────────────────────────────

pub struct BootstrapAdminInput {
    pub username: String,
    pub password: String,
}

pub struct BootstrapAdminUseCase<A>
where
    A: AdminRepository,
{
    pub admins: A,
}

impl<A> BootstrapAdminUseCase<A>
where
    A: AdminRepository,
{
    /// Create the first admin account if none exists. Returns `true` if one was created.
    pub async fn execute(&self, input: BootstrapAdminInput) -> Result<bool, ActivationServiceError> {
        if self.admins.exists_any().await? {
            return Ok(false);
        }

        let now = Utc::now();
        let admin = AdminUser {
            id: Uuid::now_v7(),
            username: input.username,
            password_hash: hash_password(&input.password).context("hash password")?,
            created_at: now,
            updated_at: now,
        };
        self.admins.create(&admin).await?;
        tracing::warn!(
            username = %admin.username,
            "created bootstrap admin account; change its password before production use"
        );
        Ok(true)
    }
}
