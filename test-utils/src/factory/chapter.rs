//! Chapter factory for creating test chapter entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test chapters with customizable fields.
pub struct ChapterFactory<'a> {
    db: &'a DatabaseConnection,
    book_id: i32,
    chapter_number: i32,
    title: String,
    is_published: bool,
}

impl<'a> ChapterFactory<'a> {
    /// Creates a new published ChapterFactory for the given book and number.
    pub fn new(db: &'a DatabaseConnection, book_id: i32, chapter_number: i32) -> Self {
        Self {
            db,
            book_id,
            chapter_number,
            title: format!("Chapter {}", chapter_number),
            is_published: true,
        }
    }

    /// Sets the chapter title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets whether the chapter is visible to readers.
    pub fn published(mut self, is_published: bool) -> Self {
        self.is_published = is_published;
        self
    }

    /// Builds and inserts the chapter entity into the database.
    pub async fn build(self) -> Result<entity::chapter::Model, DbErr> {
        let now = Utc::now();
        entity::chapter::ActiveModel {
            book_id: ActiveValue::Set(self.book_id),
            title: ActiveValue::Set(self.title),
            content: ActiveValue::Set(Some("Once upon a time.".to_string())),
            chapter_number: ActiveValue::Set(self.chapter_number),
            image_url: ActiveValue::Set(None),
            is_published: ActiveValue::Set(self.is_published),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a published chapter with default values.
pub async fn create_chapter(
    db: &DatabaseConnection,
    book_id: i32,
    chapter_number: i32,
) -> Result<entity::chapter::Model, DbErr> {
    ChapterFactory::new(db, book_id, chapter_number).build().await
}
