use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250701_000004_create_book_table::Book,
    m20250701_000008_create_reading_list_table::ReadingList,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReadingListItem::Table)
                    .if_not_exists()
                    .col(pk_auto(ReadingListItem::Id))
                    .col(integer(ReadingListItem::ReadingListId))
                    .col(integer(ReadingListItem::BookId))
                    .col(integer(ReadingListItem::OrderIndex).default(0))
                    .col(string_null(ReadingListItem::Notes))
                    .col(
                        timestamp_with_time_zone(ReadingListItem::AddedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_list_item_list_id")
                            .from(ReadingListItem::Table, ReadingListItem::ReadingListId)
                            .to(ReadingList::Table, ReadingList::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_list_item_book_id")
                            .from(ReadingListItem::Table, ReadingListItem::BookId)
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
                    .name("idx_reading_list_items_list_book")
                    .table(ReadingListItem::Table)
                    .col(ReadingListItem::ReadingListId)
                    .col(ReadingListItem::BookId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReadingListItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReadingListItem {
    #[sea_orm(iden = "reading_list_items")]
    Table,
    Id,
    ReadingListId,
    BookId,
    OrderIndex,
    Notes,
    AddedAt,
}
