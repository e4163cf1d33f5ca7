use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminActivityLog::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminActivityLog::Id))
                    .col(integer(AdminActivityLog::AdminId))
                    .col(string(AdminActivityLog::ActivityType))
                    .col(string(AdminActivityLog::Action))
                    .col(string(AdminActivityLog::ResourceType))
                    .col(string_null(AdminActivityLog::ResourceId))
                    .col(json_null(AdminActivityLog::BeforeState))
                    .col(json_null(AdminActivityLog::AfterState))
                    .col(json_null(AdminActivityLog::Details))
                    .col(boolean(AdminActivityLog::Success))
                    .col(string_null(AdminActivityLog::IpAddress))
                    .col(
                        timestamp_with_time_zone(AdminActivityLog::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_admin_activity_logs_admin_id")
                    .table(AdminActivityLog::Table)
                    .col(AdminActivityLog::AdminId)
                    .col(AdminActivityLog::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminActivityLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AdminActivityLog {
    #[sea_orm(iden = "admin_activity_logs")]
    Table,
    Id,
    AdminId,
    ActivityType,
    Action,
    ResourceType,
    ResourceId,
    BeforeState,
    AfterState,
    Details,
    Success,
    IpAddress,
    CreatedAt,
}
