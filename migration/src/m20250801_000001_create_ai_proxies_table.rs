use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiProxies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiProxies::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AiProxies::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiProxies::Provider)
                            .string_len(30)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiProxies::BaseUrl)
                            .string_len(512)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiProxies::ApiKey)
                            .string_len(1024)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiProxies::Models)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiProxies::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AiProxies::Priority)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    // 被动健康检查字段
                    .col(
                        ColumnDef::new(AiProxies::HealthStatus)
                            .string_len(20)
                            .not_null()
                            .default("healthy"),
                    )
                    .col(
                        ColumnDef::new(AiProxies::FailureCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(AiProxies::LastError).string_len(500))
                    .col(ColumnDef::new(AiProxies::LastErrorAt).timestamp())
                    .col(
                        ColumnDef::new(AiProxies::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AiProxies::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .name("idx_ai_proxies_active_priority")
                    .table(AiProxies::Table)
                    .col(AiProxies::IsActive)
                    .col(AiProxies::Priority)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ai_proxies_health_status")
                    .table(AiProxies::Table)
                    .col(AiProxies::HealthStatus)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiProxies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AiProxies {
    Table,
    Id,
    Name,
    Provider,
    BaseUrl,
    ApiKey,
    Models,
    IsActive,
    Priority,
    // 被动健康检查字段
    HealthStatus,
    FailureCount,
    LastError,
    LastErrorAt,
    CreatedAt,
    UpdatedAt,
}
