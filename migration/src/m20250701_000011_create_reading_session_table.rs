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
                    .table(ReadingSession::Table)
                    .if_not_exists()
                    .col(pk_auto(ReadingSession::Id))
                    .col(integer(ReadingSession::UserId))
                    .col(integer(ReadingSession::BookId))
                    .col(integer_null(ReadingSession::ChapterId))
                    .col(
                        timestamp_with_time_zone(ReadingSession::StartTime)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(ReadingSession::EndTime))
                    .col(integer_null(ReadingSession::DurationMinutes))
                    .col(integer_null(ReadingSession::StartPage))
                    .col(integer_null(ReadingSession::EndPage))
                    .col(integer_null(ReadingSession::PagesRead))
                    .col(boolean(ReadingSession::IsActive).default(true))
                    .col(string_null(ReadingSession::Notes))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_session_user_id")
                            .from(ReadingSession::Table, ReadingSession::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_session_book_id")
                            .from(ReadingSession::Table, ReadingSession::BookId)
                            .to(Book::Table, Book::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReadingSession::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReadingSession {
    #[sea_orm(iden = "reading_sessions")]
    Table,
    Id,
    UserId,
    BookId,
    ChapterId,
    StartTime,
    EndTime,
    DurationMinutes,
    StartPage,
    EndPage,
    PagesRead,
    IsActive,
    Notes,
}
