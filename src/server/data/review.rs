use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::review::{CreateReviewParams, Review, UpdateReviewParams};

pub struct ReviewRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a review. A second review by the same user for the same book is a unique
    /// violation.
    pub async fn create(&self, params: CreateReviewParams) -> Result<Review, DbErr> {
        let now = Utc::now();

        let entity = entity::review::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            book_id: ActiveValue::Set(params.book_id),
            rating: ActiveValue::Set(params.rating),
            title: ActiveValue::Set(params.title),
            content: ActiveValue::Set(params.content),
            contains_spoilers: ActiveValue::Set(params.contains_spoilers),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Review::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Review>, DbErr> {
        let entity = entity::prelude::Review::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Review::from_entity))
    }

    pub async fn find_by_user_and_book(
        &self,
        user_id: i32,
        book_id: i32,
    ) -> Result<Option<Review>, DbErr> {
        let entity = entity::prelude::Review::find()
            .filter(entity::review::Column::UserId.eq(user_id))
            .filter(entity::review::Column::BookId.eq(book_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Review::from_entity))
    }

    /// Gets a book's reviews newest first with pagination.
    pub async fn get_by_book_paginated(
        &self,
        book_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Review>, u64), DbErr> {
        let paginator = entity::prelude::Review::find()
            .filter(entity::review::Column::BookId.eq(book_id))
            .order_by_desc(entity::review::Column::CreatedAt)
            .order_by_desc(entity::review::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((entities.into_iter().map(Review::from_entity).collect(), total))
    }

    /// Gets every rating left on a book.
    pub async fn get_ratings_for_book(&self, book_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Review::find()
            .select_only()
            .column(entity::review::Column::Rating)
            .filter(entity::review::Column::BookId.eq(book_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateReviewParams,
    ) -> Result<Option<Review>, DbErr> {
        let Some(model) = entity::prelude::Review::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::review::ActiveModel = model.into();
        if let Some(rating) = params.rating {
            active.rating = ActiveValue::Set(rating);
        }
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(content) = params.content {
            active.content = ActiveValue::Set(content);
        }
        if let Some(contains_spoilers) = params.contains_spoilers {
            active.contains_spoilers = ActiveValue::Set(contains_spoilers);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Review::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Review::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
