use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiProxyAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiProxyAssignments::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AiProxyAssignments::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AiProxyAssignments::Description).string_len(500))
                    .col(
                        ColumnDef::new(AiProxyAssignments::FeatureKey)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiProxyAssignments::ProxyId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AiProxyAssignments::Models).json())
                    .col(ColumnDef::new(AiProxyAssignments::DefaultModel).string_len(100))
                    .col(
                        ColumnDef::new(AiProxyAssignments::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AiProxyAssignments::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AiProxyAssignments::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_proxy_assignments_proxy_id")
                            .from(AiProxyAssignments::Table, AiProxyAssignments::ProxyId)
                            .to(AiProxies::Table, AiProxies::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 功能标识非唯一：同一功能可绑定多个候选 Proxy
        manager
            .create_index(
                Index::create()
                    .name("idx_ai_proxy_assignments_feature_key")
                    .table(AiProxyAssignments::Table)
                    .col(AiProxyAssignments::FeatureKey)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ai_proxy_assignments_proxy_id")
                    .table(AiProxyAssignments::Table)
                    .col(AiProxyAssignments::ProxyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiProxyAssignments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AiProxyAssignments {
    Table,
    Id,
    Name,
    Description,
    FeatureKey,
    ProxyId,
    Models,
    DefaultModel,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AiProxies {
    Table,
    Id,
}
