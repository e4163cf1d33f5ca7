use sea_orm_migration::{prelude::*, schema::*};

use super::m20250701_000004_create_book_table::Book;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chapter::Table)
                    .if_not_exists()
                    .col(pk_auto(Chapter::Id))
                    .col(integer(Chapter::BookId))
                    .col(string(Chapter::Title))
                    .col(text_null(Chapter::Content))
                    .col(integer(Chapter::ChapterNumber))
                    .col(string_null(Chapter::ImageUrl))
                    .col(boolean(Chapter::IsPublished).default(false))
                    .col(boolean(Chapter::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Chapter::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Chapter::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chapter_book_id")
                            .from(Chapter::Table, Chapter::BookId)
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
                    .name("idx_chapters_book_number")
                    .table(Chapter::Table)
                    .col(Chapter::BookId)
                    .col(Chapter::ChapterNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chapter::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Chapter {
    #[sea_orm(iden = "chapters")]
    Table,
    Id,
    BookId,
    Title,
    Content,
    ChapterNumber,
    ImageUrl,
    IsPublished,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
