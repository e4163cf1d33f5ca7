//! Reading progress factory for creating test progress rows.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating reading progress rows with customizable fields.
pub struct ReadingProgressFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    book_id: i32,
    current_page: i32,
    total_pages: Option<i32>,
    status: String,
    reading_time_minutes: i32,
}

impl<'a> ReadingProgressFactory<'a> {
    /// Creates a new factory for a not-started book of 100 pages.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, book_id: i32) -> Self {
        Self {
            db,
            user_id,
            book_id,
            current_page: 0,
            total_pages: Some(100),
            status: "not_started".to_string(),
            reading_time_minutes: 0,
        }
    }

    /// Sets the current page.
    pub fn current_page(mut self, current_page: i32) -> Self {
        self.current_page = current_page;
        self
    }

    /// Sets the total page count.
    pub fn total_pages(mut self, total_pages: Option<i32>) -> Self {
        self.total_pages = total_pages;
        self
    }

    /// Sets the status string (`not_started`, `reading`, `completed`, `paused`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the accumulated reading time.
    pub fn reading_time_minutes(mut self, minutes: i32) -> Self {
        self.reading_time_minutes = minutes;
        self
    }

    /// Builds and inserts the reading progress entity into the database.
    ///
    /// Percentage and completion flags are derived from the page counts and status.
    pub async fn build(self) -> Result<entity::reading_progress::Model, DbErr> {
        let now = Utc::now();
        let percentage = match self.total_pages {
            Some(total) if total > 0 => (self.current_page as f64 / total as f64 * 100.0).min(100.0),
            _ => 0.0,
        };
        let is_completed = self.status == "completed";
        entity::reading_progress::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            book_id: ActiveValue::Set(self.book_id),
            current_page: ActiveValue::Set(self.current_page),
            total_pages: ActiveValue::Set(self.total_pages),
            progress_percentage: ActiveValue::Set(percentage),
            reading_time_minutes: ActiveValue::Set(self.reading_time_minutes),
            status: ActiveValue::Set(self.status),
            is_completed: ActiveValue::Set(is_completed),
            started_at: ActiveValue::Set(None),
            completed_at: ActiveValue::Set(is_completed.then_some(now)),
            last_read_at: ActiveValue::Set(None),
            notes: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a not-started progress row for the user and book.
pub async fn create_reading_progress(
    db: &DatabaseConnection,
    user_id: i32,
    book_id: i32,
) -> Result<entity::reading_progress::Model, DbErr> {
    ReadingProgressFactory::new(db, user_id, book_id).build().await
}
