use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::reading_session::{ReadingSession, SessionEnding, StartSessionParams};

pub struct ReadingSessionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReadingSessionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a new active session starting now.
    pub async fn create(&self, params: StartSessionParams) -> Result<ReadingSession, DbErr> {
        let entity = entity::reading_session::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            book_id: ActiveValue::Set(params.book_id),
            chapter_id: ActiveValue::Set(params.chapter_id),
            start_time: ActiveValue::Set(Utc::now()),
            end_time: ActiveValue::Set(None),
            duration_minutes: ActiveValue::Set(None),
            start_page: ActiveValue::Set(params.start_page),
            end_page: ActiveValue::Set(None),
            pages_read: ActiveValue::Set(None),
            is_active: ActiveValue::Set(true),
            notes: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(ReadingSession::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<ReadingSession>, DbErr> {
        let entity = entity::prelude::ReadingSession::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(ReadingSession::from_entity))
    }

    /// Gets every session a user still has open.
    pub async fn get_active_by_user(&self, user_id: i32) -> Result<Vec<ReadingSession>, DbErr> {
        let entities = entity::prelude::ReadingSession::find()
            .filter(entity::reading_session::Column::UserId.eq(user_id))
            .filter(entity::reading_session::Column::IsActive.eq(true))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ReadingSession::from_entity).collect())
    }

    /// Closes a session with precomputed ending values.
    pub async fn end(&self, id: i32, ending: SessionEnding) -> Result<ReadingSession, DbErr> {
        let entity = entity::reading_session::ActiveModel {
            id: ActiveValue::Unchanged(id),
            end_time: ActiveValue::Set(Some(ending.end_time)),
            duration_minutes: ActiveValue::Set(Some(ending.duration_minutes)),
            end_page: ActiveValue::Set(ending.end_page),
            pages_read: ActiveValue::Set(ending.pages_read),
            notes: ActiveValue::Set(ending.notes),
            is_active: ActiveValue::Set(false),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(ReadingSession::from_entity(entity))
    }

    /// Gets a user's sessions, most recent first.
    pub async fn get_by_user_paginated(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ReadingSession>, u64), DbErr> {
        let paginator = entity::prelude::ReadingSession::find()
            .filter(entity::reading_session::Column::UserId.eq(user_id))
            .order_by_desc(entity::reading_session::Column::StartTime)
            .order_by_desc(entity::reading_session::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((
            entities.into_iter().map(ReadingSession::from_entity).collect(),
            total,
        ))
    }
}
