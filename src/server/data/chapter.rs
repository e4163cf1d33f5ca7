use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::chapter::{Chapter, CreateChapterParams, UpdateChapterParams};

pub struct ChapterRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChapterRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a chapter. A duplicate chapter number within the book is a unique violation.
    pub async fn create(&self, params: CreateChapterParams) -> Result<Chapter, DbErr> {
        let now = Utc::now();

        let entity = entity::chapter::ActiveModel {
            book_id: ActiveValue::Set(params.book_id),
            title: ActiveValue::Set(params.title),
            content: ActiveValue::Set(params.content),
            chapter_number: ActiveValue::Set(params.chapter_number),
            image_url: ActiveValue::Set(params.image_url),
            is_published: ActiveValue::Set(params.is_published),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Chapter::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Chapter>, DbErr> {
        let entity = entity::prelude::Chapter::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Chapter::from_entity))
    }

    /// Gets a book's chapters in chapter number order.
    ///
    /// # Arguments
    /// - `book_id` - Book whose chapters to list
    /// - `published_only` - Restrict to published, active chapters
    pub async fn get_by_book(
        &self,
        book_id: i32,
        published_only: bool,
    ) -> Result<Vec<Chapter>, DbErr> {
        let mut query =
            entity::prelude::Chapter::find().filter(entity::chapter::Column::BookId.eq(book_id));
        if published_only {
            query = query
                .filter(entity::chapter::Column::IsPublished.eq(true))
                .filter(entity::chapter::Column::IsActive.eq(true));
        }

        let entities = query
            .order_by_asc(entity::chapter::Column::ChapterNumber)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Chapter::from_entity).collect())
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateChapterParams,
    ) -> Result<Option<Chapter>, DbErr> {
        let Some(model) = entity::prelude::Chapter::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::chapter::ActiveModel = model.into();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(content) = params.content {
            active.content = ActiveValue::Set(content);
        }
        if let Some(chapter_number) = params.chapter_number {
            active.chapter_number = ActiveValue::Set(chapter_number);
        }
        if let Some(image_url) = params.image_url {
            active.image_url = ActiveValue::Set(image_url);
        }
        if let Some(is_published) = params.is_published {
            active.is_published = ActiveValue::Set(is_published);
        }
        if let Some(is_active) = params.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Chapter::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Chapter::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
