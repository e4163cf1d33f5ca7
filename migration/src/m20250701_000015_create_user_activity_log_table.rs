use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserActivityLog::Table)
                    .if_not_exists()
                    .col(pk_auto(UserActivityLog::Id))
                    .col(integer(UserActivityLog::UserId))
                    .col(string(UserActivityLog::ActivityType))
                    .col(string_null(UserActivityLog::ResourceType))
                    .col(string_null(UserActivityLog::ResourceId))
                    .col(string_null(UserActivityLog::IpAddress))
                    .col(string_null(UserActivityLog::UserAgent))
                    .col(json_null(UserActivityLog::Metadata))
                    .col(
                        timestamp_with_time_zone(UserActivityLog::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_activity_logs_user_id")
                    .table(UserActivityLog::Table)
                    .col(UserActivityLog::UserId)
                    .col(UserActivityLog::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserActivityLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserActivityLog {
    #[sea_orm(iden = "user_activity_logs")]
    Table,
    Id,
    UserId,
    ActivityType,
    ResourceType,
    ResourceId,
    IpAddress,
    UserAgent,
    Metadata,
    CreatedAt,
}
