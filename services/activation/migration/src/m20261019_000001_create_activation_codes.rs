use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivationCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivationCodes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ActivationCodes::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ActivationCodes::IsUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ActivationCodes::ActivatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(ActivationCodes::ExpiresAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ActivationCodes::ValidationCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ActivationCodes::LastValidatedAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(ActivationCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Sweeper and stats filter on (is_used, expires_at).
        manager
            .create_index(
                Index::create()
                    .table(ActivationCodes::Table)
                    .col(ActivationCodes::IsUsed)
                    .col(ActivationCodes::ExpiresAt)
                    .name("idx_activation_codes_is_used_expires_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivationCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ActivationCodes {
    Table,
    Id,
    Code,
    IsUsed,
    ActivatedAt,
    ExpiresAt,
    ValidationCount,
    LastValidatedAt,
    CreatedAt,
}
