use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Author::Table)
                    .if_not_exists()
                    .col(pk_auto(Author::Id))
                    .col(string(Author::Name))
                    .col(text_null(Author::Bio))
                    .col(date_null(Author::BirthDate))
                    .col(date_null(Author::DeathDate))
                    .col(string_null(Author::Nationality))
                    .col(string_null(Author::Website))
                    .col(string_null(Author::ImageUrl))
                    .col(
                        timestamp_with_time_zone(Author::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Author::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_authors_name")
                    .table(Author::Table)
                    .col(Author::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Author::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Author {
    #[sea_orm(iden = "authors")]
    Table,
    Id,
    Name,
    Bio,
    BirthDate,
    DeathDate,
    Nationality,
    Website,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}
