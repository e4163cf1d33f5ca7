use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250701_000002_create_author_table::Author,
    m20250701_000003_create_category_table::Category,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Book::Table)
                    .if_not_exists()
                    .col(pk_auto(Book::Id))
                    .col(string(Book::Title))
                    .col(string_null(Book::Isbn).unique_key())
                    .col(text_null(Book::Description))
                    .col(date_null(Book::PublicationDate))
                    .col(integer_null(Book::Pages))
                    .col(string_null(Book::Language))
                    .col(string_null(Book::CoverUrl))
                    .col(string_null(Book::PdfUrl))
                    .col(string_null(Book::EpubUrl))
                    .col(double_null(Book::Price))
                    .col(boolean(Book::IsFree).default(false))
                    .col(boolean(Book::IsActive).default(true))
                    .col(integer(Book::AuthorId))
                    .col(integer(Book::CategoryId))
                    .col(
                        timestamp_with_time_zone(Book::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Book::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_author_id")
                            .from(Book::Table, Book::AuthorId)
                            .to(Author::Table, Author::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_category_id")
                            .from(Book::Table, Book::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Book::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Book {
    #[sea_orm(iden = "books")]
    Table,
    Id,
    Title,
    Isbn,
    Description,
    PublicationDate,
    Pages,
    Language,
    CoverUrl,
    PdfUrl,
    EpubUrl,
    Price,
    IsFree,
    IsActive,
    AuthorId,
    CategoryId,
    CreatedAt,
    UpdatedAt,
}
