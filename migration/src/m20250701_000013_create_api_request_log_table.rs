use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApiRequestLog::Table)
                    .if_not_exists()
                    .col(pk_auto(ApiRequestLog::Id))
                    .col(string(ApiRequestLog::Endpoint))
                    .col(string(ApiRequestLog::Method))
                    .col(integer(ApiRequestLog::StatusCode))
                    .col(big_integer(ApiRequestLog::DurationMs))
                    .col(integer_null(ApiRequestLog::UserId))
                    .col(integer_null(ApiRequestLog::AdminId))
                    .col(string_null(ApiRequestLog::ClientIp))
                    .col(string_null(ApiRequestLog::UserAgent))
                    .col(string(ApiRequestLog::CorrelationId))
                    .col(string_null(ApiRequestLog::QueryParams))
                    .col(
                        timestamp_with_time_zone(ApiRequestLog::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_api_request_logs_endpoint")
                    .table(ApiRequestLog::Table)
                    .col(ApiRequestLog::Endpoint)
                    .col(ApiRequestLog::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApiRequestLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ApiRequestLog {
    #[sea_orm(iden = "api_request_logs")]
    Table,
    Id,
    Endpoint,
    Method,
    StatusCode,
    DurationMs,
    UserId,
    AdminId,
    ClientIp,
    UserAgent,
    CorrelationId,
    QueryParams,
    CreatedAt,
}
