use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchLog::Table)
                    .if_not_exists()
                    .col(pk_auto(SearchLog::Id))
                    .col(string(SearchLog::Query))
                    .col(string(SearchLog::SearchType))
                    .col(integer(SearchLog::ResultsCount))
                    .col(integer_null(SearchLog::UserId))
                    .col(json_null(SearchLog::Filters))
                    .col(big_integer(SearchLog::DurationMs))
                    .col(
                        timestamp_with_time_zone(SearchLog::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_search_logs_search_type")
                    .table(SearchLog::Table)
                    .col(SearchLog::SearchType)
                    .col(SearchLog::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SearchLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SearchLog {
    #[sea_orm(iden = "search_logs")]
    Table,
    Id,
    Query,
    SearchType,
    ResultsCount,
    UserId,
    Filters,
    DurationMs,
    CreatedAt,
}
