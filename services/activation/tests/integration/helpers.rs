use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use codegate_activation::domain::repository::{ActivationCodeRepository, AdminRepository};
use codegate_activation::domain::types::{
    ActivationCode, AdminUser, CodePage, CodeStats, NewActivationCode,
};
use codegate_activation::error::ActivationServiceError;
use codegate_auth_types::password::hash_password;
use codegate_domain::id::CodeId;
use codegate_domain::pagination::{CursorPage, CursorRequest};

fn storage_down() -> ActivationServiceError {
    ActivationServiceError::Internal(anyhow::anyhow!("storage unavailable"))
}

// ── MockCodeRepo ─────────────────────────────────────────────────────────────

/// In-memory code store. Clones share state, so one handle can be kept for
/// inspection while another is moved into a usecase.
#[derive(Clone, Default)]
pub struct MockCodeRepo {
    pub codes: Arc<Mutex<Vec<ActivationCode>>>,
    next_id: Arc<AtomicI64>,
    /// Every call fails with an internal error while set.
    pub failing: Arc<AtomicBool>,
    /// The next N `insert_many` calls report a uniqueness collision.
    pub collisions: Arc<AtomicU32>,
    /// Number of `insert_many` calls that reached the store.
    pub insert_calls: Arc<AtomicU32>,
}

impl MockCodeRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_codes(codes: &[&str]) -> Self {
        let repo = Self::empty();
        for code in codes {
            repo.push(unused_code(code));
        }
        repo
    }

    /// Store `code` as-is, assigning the next id.
    pub fn push(&self, mut code: ActivationCode) -> CodeId {
        let id = CodeId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        code.id = id;
        self.codes.lock().unwrap().push(code);
        id
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn find(&self, code: &str) -> Option<ActivationCode> {
        self.codes
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.code == code)
            .cloned()
    }

    pub fn code_strings(&self) -> Vec<String> {
        self.codes
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.code.clone())
            .collect()
    }

    fn check(&self) -> Result<(), ActivationServiceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(storage_down());
        }
        Ok(())
    }
}

impl ActivationCodeRepository for MockCodeRepo {
    async fn update_by_code<F, T>(
        &self,
        code: &str,
        mutate: F,
    ) -> Result<Option<T>, ActivationServiceError>
    where
        F: FnOnce(&mut ActivationCode) -> T + Send,
        T: Send,
    {
        // Let other tasks interleave before taking the lock.
        tokio::task::yield_now().await;
        self.check()?;
        let mut codes = self.codes.lock().unwrap();
        Ok(codes.iter_mut().find(|c| c.code == code).map(mutate))
    }

    async fn insert_many(&self, new: &[NewActivationCode]) -> Result<(), ActivationServiceError> {
        self.check()?;
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self
            .collisions
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(ActivationServiceError::DuplicateCode);
        }

        let mut codes = self.codes.lock().unwrap();
        let clash = new.iter().any(|n| codes.iter().any(|c| c.code == n.code));
        if clash {
            return Err(ActivationServiceError::DuplicateCode);
        }
        for n in new {
            let id = CodeId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            codes.push(ActivationCode {
                id,
                created_at: n.created_at,
                ..unused_code(&n.code)
            });
        }
        Ok(())
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, ActivationServiceError> {
        self.check()?;
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| c.code != code);
        Ok(codes.len() < before)
    }

    async fn delete_by_ids(&self, ids: &[CodeId]) -> Result<u64, ActivationServiceError> {
        self.check()?;
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| !ids.contains(&c.id));
        Ok((before - codes.len()) as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, ActivationServiceError> {
        self.check()?;
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| !c.is_expired_at(now));
        Ok((before - codes.len()) as u64)
    }

    async fn list_all(&self) -> Result<Vec<ActivationCode>, ActivationServiceError> {
        self.check()?;
        let mut codes = self.codes.lock().unwrap().clone();
        codes.sort_by_key(|c| c.id);
        Ok(codes)
    }

    async fn page(
        &self,
        is_used: Option<bool>,
        cursor: &CursorRequest,
    ) -> Result<CodePage, ActivationServiceError> {
        self.check()?;
        let mut matching: Vec<_> = self
            .codes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| is_used.is_none_or(|u| c.is_used == u))
            .filter(|c| cursor.skip_token.is_none_or(|after| c.id > after))
            .cloned()
            .collect();
        matching.sort_by_key(|c| c.id);
        let total_count = matching.len() as u64;
        matching.truncate(cursor.fetch_limit() as usize);
        Ok(CodePage {
            page: CursorPage::from_overfetch(matching, cursor.page_size, |c| c.id),
            total_count,
        })
    }

    async fn stats(&self, now: DateTime<Utc>) -> Result<CodeStats, ActivationServiceError> {
        self.check()?;
        let codes = self.codes.lock().unwrap();
        let used = codes.iter().filter(|c| c.is_used).count() as u64;
        Ok(CodeStats {
            total: codes.len() as u64,
            unused: codes.len() as u64 - used,
            used,
            active: codes.iter().filter(|c| c.is_active_at(now)).count() as u64,
        })
    }

    async fn count(&self) -> Result<u64, ActivationServiceError> {
        self.check()?;
        Ok(self.codes.lock().unwrap().len() as u64)
    }
}

// ── MockAdminRepo ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockAdminRepo {
    pub admins: Arc<Mutex<Vec<AdminUser>>>,
}

impl MockAdminRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_admin(username: &str, password: &str) -> Self {
        let repo = Self::empty();
        repo.admins.lock().unwrap().push(test_admin(username, password));
        repo
    }

    pub fn password_hash_of(&self, username: &str) -> Option<String> {
        self.admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username)
            .map(|a| a.password_hash.clone())
    }
}

impl AdminRepository for MockAdminRepo {
    async fn exists_any(&self) -> Result<bool, ActivationServiceError> {
        Ok(!self.admins.lock().unwrap().is_empty())
    }

    async fn count(&self) -> Result<u64, ActivationServiceError> {
        Ok(self.admins.lock().unwrap().len() as u64)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, ActivationServiceError> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn create(&self, admin: &AdminUser) -> Result<(), ActivationServiceError> {
        self.admins.lock().unwrap().push(admin.clone());
        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ActivationServiceError> {
        let mut admins = self.admins.lock().unwrap();
        let admin = admins.iter_mut().find(|a| a.id == id).unwrap();
        admin.password_hash = password_hash.to_owned();
        admin.updated_at = now;
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn unused_code(code: &str) -> ActivationCode {
    ActivationCode {
        id: CodeId(0),
        code: code.to_owned(),
        is_used: false,
        activated_at: None,
        expires_at: None,
        validation_count: 0,
        last_validated_at: None,
        created_at: Utc::now() - Duration::days(30),
    }
}

/// A code activated at `activated_at`, validated once.
pub fn activated_code(code: &str, activated_at: DateTime<Utc>) -> ActivationCode {
    ActivationCode {
        is_used: true,
        activated_at: Some(activated_at),
        expires_at: Some(activated_at + Duration::days(7)),
        validation_count: 1,
        last_validated_at: Some(activated_at),
        ..unused_code(code)
    }
}

pub fn test_admin(username: &str, password: &str) -> AdminUser {
    let now = Utc::now();
    AdminUser {
        id: Uuid::new_v4(),
        username: username.to_owned(),
        password_hash: hash_password(password).unwrap(),
        created_at: now,
        updated_at: now,
    }
}
