use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{data::book::BookRepository, model::favorite::Favorite};

pub struct FavoriteRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FavoriteRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, user_id: i32, book_id: i32) -> Result<Favorite, DbErr> {
        let entity = entity::favorite::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            book_id: ActiveValue::Set(book_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Favorite::from_entity(entity))
    }

    pub async fn find(&self, user_id: i32, book_id: i32) -> Result<Option<Favorite>, DbErr> {
        let entity = entity::prelude::Favorite::find()
            .filter(entity::favorite::Column::UserId.eq(user_id))
            .filter(entity::favorite::Column::BookId.eq(book_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Favorite::from_entity))
    }

    /// Removes a favorite.
    ///
    /// # Returns
    /// - `Ok(true)` - The favorite existed and was removed
    /// - `Ok(false)` - The book was not a favorite
    pub async fn delete(&self, user_id: i32, book_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Favorite::delete_many()
            .filter(entity::favorite::Column::UserId.eq(user_id))
            .filter(entity::favorite::Column::BookId.eq(book_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets a user's favorites newest first, each with its book attached.
    pub async fn get_by_user_paginated(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Favorite>, u64), DbErr> {
        let paginator = entity::prelude::Favorite::find()
            .filter(entity::favorite::Column::UserId.eq(user_id))
            .order_by_desc(entity::favorite::Column::CreatedAt)
            .order_by_desc(entity::favorite::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        let book_ids = entities.iter().map(|f| f.book_id).collect();
        let books = BookRepository::new(self.db).get_by_ids(book_ids).await?;

        let favorites = entities
            .into_iter()
            .map(|entity| {
                let mut favorite = Favorite::from_entity(entity);
                favorite.book = books.iter().find(|b| b.id == favorite.book_id).cloned();
                favorite
            })
            .collect();

        Ok((favorites, total))
    }

    /// Counts how many users favorited a book.
    pub async fn count_for_book(&self, book_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Favorite::find()
            .filter(entity::favorite::Column::BookId.eq(book_id))
            .count(self.db)
            .await
    }
}
