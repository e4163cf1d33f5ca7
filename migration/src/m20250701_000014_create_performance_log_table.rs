use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PerformanceLog::Table)
                    .if_not_exists()
                    .col(pk_auto(PerformanceLog::Id))
                    .col(string(PerformanceLog::Component))
                    .col(string(PerformanceLog::Operation))
                    .col(big_integer(PerformanceLog::DurationMs))
                    .col(string_null(PerformanceLog::Endpoint))
                    .col(integer_null(PerformanceLog::UserId))
                    .col(integer_null(PerformanceLog::AdminId))
                    .col(json_null(PerformanceLog::Details))
                    .col(
                        timestamp_with_time_zone(PerformanceLog::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_performance_logs_component")
                    .table(PerformanceLog::Table)
                    .col(PerformanceLog::Component)
                    .col(PerformanceLog::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PerformanceLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PerformanceLog {
    #[sea_orm(iden = "performance_logs")]
    Table,
    Id,
    Component,
    Operation,
    DurationMs,
    Endpoint,
    UserId,
    AdminId,
    Details,
    CreatedAt,
}
