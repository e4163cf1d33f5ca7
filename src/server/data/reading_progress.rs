use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::reading_progress::{ReadingProgress, ReadingStatus};

pub struct ReadingProgressRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReadingProgressRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an empty, not started progress record for (user, book).
    pub async fn create(
        &self,
        user_id: i32,
        book_id: i32,
        total_pages: Option<i32>,
    ) -> Result<ReadingProgress, DbErr> {
        let now = Utc::now();

        let entity = entity::reading_progress::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            book_id: ActiveValue::Set(book_id),
            current_page: ActiveValue::Set(0),
            total_pages: ActiveValue::Set(total_pages),
            progress_percentage: ActiveValue::Set(0.0),
            reading_time_minutes: ActiveValue::Set(0),
            status: ActiveValue::Set(ReadingStatus::NotStarted.as_str().to_string()),
            is_completed: ActiveValue::Set(false),
            started_at: ActiveValue::Set(None),
            completed_at: ActiveValue::Set(None),
            last_read_at: ActiveValue::Set(None),
            notes: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(ReadingProgress::from_entity(entity))
    }

    pub async fn find(&self, user_id: i32, book_id: i32) -> Result<Option<ReadingProgress>, DbErr> {
        let entity = entity::prelude::ReadingProgress::find()
            .filter(entity::reading_progress::Column::UserId.eq(user_id))
            .filter(entity::reading_progress::Column::BookId.eq(book_id))
            .one(self.db)
            .await?;

        Ok(entity.map(ReadingProgress::from_entity))
    }

    /// Writes every mutable field of `progress` back to its row.
    pub async fn save(&self, progress: &ReadingProgress) -> Result<ReadingProgress, DbErr> {
        let entity = entity::reading_progress::ActiveModel {
            id: ActiveValue::Unchanged(progress.id),
            current_page: ActiveValue::Set(progress.current_page),
            total_pages: ActiveValue::Set(progress.total_pages),
            progress_percentage: ActiveValue::Set(progress.progress_percentage),
            reading_time_minutes: ActiveValue::Set(progress.reading_time_minutes),
            status: ActiveValue::Set(progress.status.as_str().to_string()),
            is_completed: ActiveValue::Set(progress.is_completed),
            started_at: ActiveValue::Set(progress.started_at),
            completed_at: ActiveValue::Set(progress.completed_at),
            last_read_at: ActiveValue::Set(progress.last_read_at),
            notes: ActiveValue::Set(progress.notes.clone()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(ReadingProgress::from_entity(entity))
    }

    /// Gets a user's progress records, most recently read first.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the records
    /// - `status` - Optional status filter
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Records per page
    pub async fn get_by_user_paginated(
        &self,
        user_id: i32,
        status: Option<ReadingStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ReadingProgress>, u64), DbErr> {
        let mut query = entity::prelude::ReadingProgress::find()
            .filter(entity::reading_progress::Column::UserId.eq(user_id));
        if let Some(status) = status {
            query = query.filter(entity::reading_progress::Column::Status.eq(status.as_str()));
        }

        let paginator = query
            .order_by_desc(entity::reading_progress::Column::UpdatedAt)
            .order_by_desc(entity::reading_progress::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((
            entities.into_iter().map(ReadingProgress::from_entity).collect(),
            total,
        ))
    }

    /// Gets every progress record a user owns.
    pub async fn get_all_by_user(&self, user_id: i32) -> Result<Vec<ReadingProgress>, DbErr> {
        let entities = entity::prelude::ReadingProgress::find()
            .filter(entity::reading_progress::Column::UserId.eq(user_id))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ReadingProgress::from_entity).collect())
    }

    pub async fn delete(&self, user_id: i32, book_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ReadingProgress::delete_many()
            .filter(entity::reading_progress::Column::UserId.eq(user_id))
            .filter(entity::reading_progress::Column::BookId.eq(book_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
