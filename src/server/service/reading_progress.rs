//! Per-book reading progress.
//!
//! Page arithmetic and status transitions are defined by `ProgressUpdate::apply`; this
//! service loads, applies, saves and logs.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{book::BookRepository, reading_progress::ReadingProgressRepository},
    error::AppError,
    model::{
        log::{ClientInfo, UserActivityLogParams},
        page::{Page, PageParams},
        reading_progress::{ProgressUpdate, ReadingProgress, ReadingStats, ReadingStatus},
        user::User,
    },
    service::log::LogService,
};

pub struct ReadingProgressService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReadingProgressService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the caller's progress records, most recently updated first.
    pub async fn get_paginated(
        &self,
        user: &User,
        status: Option<ReadingStatus>,
        params: PageParams,
    ) -> Result<Page<ReadingProgress>, AppError> {
        let (records, total) = ReadingProgressRepository::new(self.db)
            .get_by_user_paginated(user.id, status, params.page, params.per_page)
            .await?;

        Ok(Page::new(records, total, params))
    }

    /// Creates the caller's progress for a book, or updates it when one already exists.
    ///
    /// A new record takes its page count from the book unless the request gives one.
    ///
    /// # Returns
    /// - `Ok(ReadingProgress)` - The created or updated record
    /// - `Err(AppError::NotFound)` - Book does not exist
    pub async fn upsert(
        &self,
        user: &User,
        book_id: i32,
        update: ProgressUpdate,
        client: &ClientInfo,
    ) -> Result<ReadingProgress, AppError> {
        let repo = ReadingProgressRepository::new(self.db);

        let Some(book) = BookRepository::new(self.db).find_by_id(book_id).await? else {
            return Err(AppError::NotFound("Book not found".to_string()));
        };

        let mut progress = match repo.find(user.id, book_id).await? {
            Some(progress) => progress,
            None => {
                repo.create(user.id, book_id, update.total_pages.or(book.pages))
                    .await?
            }
        };

        if update.current_page.is_some() || update.total_pages.is_some() || update.notes.is_some()
        {
            update.apply(&mut progress, Utc::now());
            progress = repo.save(&progress).await?;
        }

        self.record(user, "READING_PROGRESS_UPDATE", &progress, client)
            .await;

        Ok(progress)
    }

    pub async fn get(&self, user: &User, book_id: i32) -> Result<ReadingProgress, AppError> {
        ReadingProgressRepository::new(self.db)
            .find(user.id, book_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reading progress not found".to_string()))
    }

    /// Applies an update to existing progress.
    ///
    /// # Returns
    /// - `Ok(ReadingProgress)` - Updated record
    /// - `Err(AppError::NotFound)` - The caller has no progress for this book
    pub async fn update(
        &self,
        user: &User,
        book_id: i32,
        update: ProgressUpdate,
        client: &ClientInfo,
    ) -> Result<ReadingProgress, AppError> {
        let mut progress = self.get(user, book_id).await?;
        let was_completed = progress.is_completed;

        update.apply(&mut progress, Utc::now());
        let progress = ReadingProgressRepository::new(self.db)
            .save(&progress)
            .await?;

        self.record(user, "READING_PROGRESS_UPDATE", &progress, client)
            .await;
        if progress.is_completed && !was_completed {
            self.record(user, "BOOK_COMPLETED", &progress, client).await;
        }

        Ok(progress)
    }

    pub async fn delete(&self, user: &User, book_id: i32, client: &ClientInfo) -> Result<(), AppError> {
        let progress = self.get(user, book_id).await?;

        ReadingProgressRepository::new(self.db)
            .delete(user.id, book_id)
            .await?;

        self.record(user, "READING_PROGRESS_DELETE", &progress, client)
            .await;

        Ok(())
    }

    pub async fn get_stats(&self, user: &User) -> Result<ReadingStats, AppError> {
        let records = ReadingProgressRepository::new(self.db)
            .get_all_by_user(user.id)
            .await?;

        Ok(ReadingStats::from_progress(&records))
    }

    async fn record(
        &self,
        user: &User,
        activity: &str,
        progress: &ReadingProgress,
        client: &ClientInfo,
    ) {
        LogService::new(self.db)
            .record_user_activity(
                UserActivityLogParams::new(user.id, activity, client)
                    .resource("book", progress.book_id)
                    .metadata(serde_json::json!({
                        "current_page": progress.current_page,
                        "progress_percentage": progress.progress_percentage,
                        "status": progress.status.as_str(),
                    })),
            )
            .await;
    }
}
