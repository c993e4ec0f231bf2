#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use codegate_domain::id::CodeId;
use codegate_domain::pagination::CursorRequest;

use crate::domain::types::{ActivationCode, AdminUser, CodePage, CodeStats, NewActivationCode};
use crate::error::ActivationServiceError;

/// Repository for activation codes.
pub trait ActivationCodeRepository: Send + Sync {
    /// Load the record named `code` under an exclusive row lock, apply `mutate`,
    /// persist the result and release the lock.
    ///
    /// Concurrent calls for the same code run one after another; each sees the
    /// state the previous one committed. Returns `None` when no record matches.
    async fn update_by_code<F, T>(
        &self,
        code: &str,
        mutate: F,
    ) -> Result<Option<T>, ActivationServiceError>
    where
        F: FnOnce(&mut ActivationCode) -> T + Send,
        T: Send;

    /// Insert a batch atomically. Any code already present fails the whole batch
    /// with [`ActivationServiceError::DuplicateCode`].
    async fn insert_many(&self, codes: &[NewActivationCode]) -> Result<(), ActivationServiceError>;

    /// Delete one record by its code. Returns `true` if a row was removed.
    async fn delete_by_code(&self, code: &str) -> Result<bool, ActivationServiceError>;

    /// Delete the listed ids atomically. Returns the number of rows removed.
    async fn delete_by_ids(&self, ids: &[CodeId]) -> Result<u64, ActivationServiceError>;

    /// Delete every used code whose window closed before `now`.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, ActivationServiceError>;

    /// Every record, ascending by id.
    async fn list_all(&self) -> Result<Vec<ActivationCode>, ActivationServiceError>;

    /// One page ascending by id, starting after the cursor, optionally filtered on `is_used`.
    async fn page(
        &self,
        is_used: Option<bool>,
        cursor: &CursorRequest,
    ) -> Result<CodePage, ActivationServiceError>;

    async fn stats(&self, now: DateTime<Utc>) -> Result<CodeStats, ActivationServiceError>;

    async fn count(&self) -> Result<u64, ActivationServiceError>;
}

/// Repository for administrator accounts.
pub trait AdminRepository: Send + Sync {
    async fn exists_any(&self) -> Result<bool, ActivationServiceError>;

    async fn count(&self) -> Result<u64, ActivationServiceError>;

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, ActivationServiceError>;

    async fn create(&self, admin: &AdminUser) -> Result<(), ActivationServiceError>;

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ActivationServiceError>;
}
