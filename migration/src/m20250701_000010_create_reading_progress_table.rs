use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250701_000001_create_user_table::User, m20250701_000004_create_book_table::Book,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReadingProgress::Table)
                    .if_not_exists()
                    .col(pk_auto(ReadingProgress::Id))
                    .col(integer(ReadingProgress::UserId))
                    .col(integer(ReadingProgress::BookId))
                    .col(integer(ReadingProgress::CurrentPage).default(0))
                    .col(integer_null(ReadingProgress::TotalPages))
                    .col(double(ReadingProgress::ProgressPercentage).default(0.0))
                    .col(integer(ReadingProgress::ReadingTimeMinutes).default(0))
                    .col(string(ReadingProgress::Status).default("not_started"))
                    .col(boolean(ReadingProgress::IsCompleted).default(false))
                    .col(timestamp_with_time_zone_null(ReadingProgress::StartedAt))
                    .col(timestamp_with_time_zone_null(ReadingProgress::CompletedAt))
                    .col(timestamp_with_time_zone_null(ReadingProgress::LastReadAt))
                    .col(text_null(ReadingProgress::Notes))
                    .col(
                        timestamp_with_time_zone(ReadingProgress::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(ReadingProgress::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_progress_user_id")
                            .from(ReadingProgress::Table, ReadingProgress::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_progress_book_id")
                            .from(ReadingProgress::Table, ReadingProgress::BookId)
                            .to(Book::Table, Book::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reading_progress_user_book")
                    .table(ReadingProgress::Table)
                    .col(ReadingProgress::UserId)
                    .col(ReadingProgress::BookId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReadingProgress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReadingProgress {
    #[sea_orm(iden = "reading_progress")]
    Table,
    Id,
    UserId,
    BookId,
    CurrentPage,
    TotalPages,
    ProgressPercentage,
    ReadingTimeMinutes,
    Status,
    IsCompleted,
    StartedAt,
    CompletedAt,
    LastReadAt,
    Notes,
    CreatedAt,
    UpdatedAt,
}
