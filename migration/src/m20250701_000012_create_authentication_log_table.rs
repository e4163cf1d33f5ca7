use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthenticationLog::Table)
                    .if_not_exists()
                    .col(pk_auto(AuthenticationLog::Id))
                    .col(integer_null(AuthenticationLog::UserId))
                    .col(string(AuthenticationLog::EventType))
                    .col(string(AuthenticationLog::Status))
                    .col(boolean(AuthenticationLog::IsSuccess))
                    .col(string_null(AuthenticationLog::FailureReason))
                    .col(string_null(AuthenticationLog::IpAddress))
                    .col(string_null(AuthenticationLog::UserAgent))
                    .col(json_null(AuthenticationLog::Details))
                    .col(
                        timestamp_with_time_zone(AuthenticationLog::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_authentication_logs_event_type")
                    .table(AuthenticationLog::Table)
                    .col(AuthenticationLog::EventType)
                    .col(AuthenticationLog::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuthenticationLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AuthenticationLog {
    #[sea_orm(iden = "authentication_logs")]
    Table,
    Id,
    UserId,
    EventType,
    Status,
    IsSuccess,
    FailureReason,
    IpAddress,
    UserAgent,
    Details,
    CreatedAt,
}
