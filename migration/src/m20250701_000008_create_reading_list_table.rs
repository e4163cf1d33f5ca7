use sea_orm_migration::{prelude::*, schema::*};

use super::m20250701_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReadingList::Table)
                    .if_not_exists()
                    .col(pk_auto(ReadingList::Id))
                    .col(integer(ReadingList::UserId))
                    .col(string(ReadingList::Name))
                    .col(text_null(ReadingList::Description))
                    .col(boolean(ReadingList::IsPublic).default(false))
                    .col(boolean(ReadingList::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(ReadingList::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(ReadingList::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_list_user_id")
                            .from(ReadingList::Table, ReadingList::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReadingList::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReadingList {
    #[sea_orm(iden = "reading_lists")]
    Table,
    Id,
    UserId,
    Name,
    Description,
    IsPublic,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
