use std::sync::Arc;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use codegate_activation_migration::{Migrator, MigratorTrait};
use codegate_activation_schema::{activation_codes, admin_users};
use codegate_domain::id::CodeId;
use codegate_domain::pagination::{CursorPage, CursorRequest};

use crate::domain::repository::{ActivationCodeRepository, AdminRepository};
use crate::domain::types::{ActivationCode, AdminUser, CodePage, CodeStats, NewActivationCode};
use crate::error::ActivationServiceError;

/// Ids per `DELETE ... WHERE id IN (...)` statement.
const DELETE_CHUNK_SIZE: usize = 1000;

/// Apply all pending schema migrations.
pub async fn run_migrations(db: &DatabaseConnection) -> anyhow::Result<()> {
    Migrator::up(db, None).await.context("run migrations")?;
    Ok(())
}

// ── ActivationCode repository ────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbActivationCodeRepository {
    pub db: Arc<DatabaseConnection>,
}

impl ActivationCodeRepository for DbActivationCodeRepository {
    async fn update_by_code<F, T>(
        &self,
        code: &str,
        mutate: F,
    ) -> Result<Option<T>, ActivationServiceError>
    where
        F: FnOnce(&mut ActivationCode) -> T + Send,
        T: Send,
    {
        let txn = self.db.begin().await.context("begin code update")?;

        // SELECT ... FOR UPDATE: concurrent updates of the same code queue here.
        let model = activation_codes::Entity::find()
            .filter(activation_codes::Column::Code.eq(code))
            .lock_exclusive()
            .one(&txn)
            .await
            .context("lock activation code")?;
        let Some(model) = model else {
            txn.rollback().await.context("rollback code update")?;
            return Ok(None);
        };

        let mut record = code_from_model(model);
        let out = mutate(&mut record);

        activation_codes::ActiveModel {
            id: Set(record.id.0),
            is_used: Set(record.is_used),
            activated_at: Set(record.activated_at),
            expires_at: Set(record.expires_at),
            validation_count: Set(i32::try_from(record.validation_count).unwrap_or(i32::MAX)),
            last_validated_at: Set(record.last_validated_at),
            ..Default::default()
        }
        .update(&txn)
        .await
        .context("update activation code")?;

        txn.commit().await.context("commit code update")?;
        Ok(Some(out))
    }

    async fn insert_many(&self, codes: &[NewActivationCode]) -> Result<(), ActivationServiceError> {
        if codes.is_empty() {
            return Ok(());
        }
        let models = codes.iter().map(|c| activation_codes::ActiveModel {
            code: Set(c.code.clone()),
            is_used: Set(false),
            activated_at: Set(None),
            expires_at: Set(None),
            validation_count: Set(0),
            last_validated_at: Set(None),
            created_at: Set(c.created_at),
            ..Default::default()
        });

        // One multi-row INSERT: either every row lands or none does.
        match activation_codes::Entity::insert_many(models)
            .exec(&*self.db)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ActivationServiceError::DuplicateCode),
            Err(e) => Err(anyhow::Error::new(e)
                .context("insert activation codes")
                .into()),
        }
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, ActivationServiceError> {
        let result = activation_codes::Entity::delete_many()
            .filter(activation_codes::Column::Code.eq(code))
            .exec(&*self.db)
            .await
            .context("delete activation code")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_by_ids(&self, ids: &[CodeId]) -> Result<u64, ActivationServiceError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<i64> = ids.iter().map(|id| id.0).collect();
        let deleted = self
            .db
            .transaction::<_, u64, DbErr>(move |txn| {
                Box::pin(async move {
                    let mut deleted = 0;
                    for chunk in ids.chunks(DELETE_CHUNK_SIZE) {
                        let result = activation_codes::Entity::delete_many()
                            .filter(activation_codes::Column::Id.is_in(chunk.iter().copied()))
                            .exec(txn)
                            .await?;
                        deleted += result.rows_affected;
                    }
                    Ok(deleted)
                })
            })
            .await
            .context("delete activation codes by id")?;
        Ok(deleted)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, ActivationServiceError> {
        let result = activation_codes::Entity::delete_many()
            .filter(activation_codes::Column::IsUsed.eq(true))
            .filter(activation_codes::Column::ExpiresAt.lt(now))
            .exec(&*self.db)
            .await
            .context("delete expired activation codes")?;
        Ok(result.rows_affected)
    }

    async fn list_all(&self) -> Result<Vec<ActivationCode>, ActivationServiceError> {
        let models = activation_codes::Entity::find()
            .order_by_asc(activation_codes::Column::Id)
            .all(&*self.db)
            .await
            .context("list activation codes")?;
        Ok(models.into_iter().map(code_from_model).collect())
    }

    async fn page(
        &self,
        is_used: Option<bool>,
        cursor: &CursorRequest,
    ) -> Result<CodePage, ActivationServiceError> {
        let mut select = activation_codes::Entity::find();
        if let Some(is_used) = is_used {
            select = select.filter(activation_codes::Column::IsUsed.eq(is_used));
        }
        if let Some(after) = cursor.skip_token {
            select = select.filter(activation_codes::Column::Id.gt(after.0));
        }

        let total_count = select
            .clone()
            .count(&*self.db)
            .await
            .context("count activation code page")?;
        let models = select
            .order_by_asc(activation_codes::Column::Id)
            .limit(cursor.fetch_limit())
            .all(&*self.db)
            .await
            .context("fetch activation code page")?;

        let rows = models.into_iter().map(code_from_model).collect();
        Ok(CodePage {
            page: CursorPage::from_overfetch(rows, cursor.page_size, |c: &ActivationCode| c.id),
            total_count,
        })
    }

    async fn stats(&self, now: DateTime<Utc>) -> Result<CodeStats, ActivationServiceError> {
        let total = activation_codes::Entity::find()
            .count(&*self.db)
            .await
            .context("count codes")?;
        let unused = activation_codes::Entity::find()
            .filter(activation_codes::Column::IsUsed.eq(false))
            .count(&*self.db)
            .await
            .context("count unused codes")?;
        let used = activation_codes::Entity::find()
            .filter(activation_codes::Column::IsUsed.eq(true))
            .count(&*self.db)
            .await
            .context("count used codes")?;
        let active = activation_codes::Entity::find()
            .filter(activation_codes::Column::IsUsed.eq(true))
            .filter(activation_codes::Column::ExpiresAt.gt(now))
            .count(&*self.db)
            .await
            .context("count active codes")?;
        Ok(CodeStats {
            total,
            unused,
            used,
            active,
        })
    }

    async fn count(&self) -> Result<u64, ActivationServiceError> {
        let count = activation_codes::Entity::find()
            .count(&*self.db)
            .await
            .context("count codes")?;
        Ok(count)
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn code_from_model(model: activation_codes::Model) -> ActivationCode {
    ActivationCode {
        id: CodeId(model.id),
        code: model.code,
        is_used: model.is_used,
        activated_at: model.activated_at,
        expires_at: model.expires_at,
        validation_count: u32::try_from(model.validation_count).unwrap_or(0),
        last_validated_at: model.last_validated_at,
        created_at: model.created_at,
    }
}

// ── Admin repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAdminRepository {
    pub db: Arc<DatabaseConnection>,
}

impl AdminRepository for DbAdminRepository {
    async fn exists_any(&self) -> Result<bool, ActivationServiceError> {
        let count = admin_users::Entity::find()
            .count(&*self.db)
            .await
            .context("count admins")?;
        Ok(count > 0)
    }

    async fn count(&self) -> Result<u64, ActivationServiceError> {
        let count = admin_users::Entity::find()
            .count(&*self.db)
            .await
            .context("count admins")?;
        Ok(count)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, ActivationServiceError> {
        let model = admin_users::Entity::find()
            .filter(admin_users::Column::Username.eq(username))
            .one(&*self.db)
            .await
            .context("find admin by username")?;
        Ok(model.map(admin_from_model))
    }

    async fn create(&self, admin: &AdminUser) -> Result<(), ActivationServiceError> {
        admin_users::ActiveModel {
            id: Set(admin.id),
            username: Set(admin.username.clone()),
            password_hash: Set(admin.password_hash.clone()),
            created_at: Set(admin.created_at),
            updated_at: Set(admin.updated_at),
        }
        .insert(&*self.db)
        .await
        .context("create admin")?;
        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ActivationServiceError> {
        admin_users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&*self.db)
        .await
        .context("update admin password")?;
        Ok(())
    }
}

fn admin_from_model(model: admin_users::Model) -> AdminUser {
    AdminUser {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
