//! Timed reading sessions.
//!
//! A user has at most one active session: starting a new one closes any that are still
//! open. Ending a session credits its minutes to the reading progress for that book.

use std::time::Instant;

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        book::BookRepository, chapter::ChapterRepository,
        reading_progress::ReadingProgressRepository, reading_session::ReadingSessionRepository,
    },
    error::AppError,
    model::{
        log::{ClientInfo, PerformanceLogParams, UserActivityLogParams},
        page::{Page, PageParams},
        reading_session::{ReadingSession, SessionEnding, StartSessionParams},
        user::User,
    },
    service::log::LogService,
};

pub struct ReadingSessionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReadingSessionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Starts a session, first ending any session the user still has open.
    ///
    /// # Returns
    /// - `Ok(ReadingSession)` - The new active session
    /// - `Err(AppError::NotFound)` - Book does not exist, or the chapter is not part of it
    pub async fn start(
        &self,
        user: &User,
        params: StartSessionParams,
        client: &ClientInfo,
    ) -> Result<ReadingSession, AppError> {
        let started = Instant::now();
        let repo = ReadingSessionRepository::new(self.db);

        if !BookRepository::new(self.db).exists(params.book_id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        if let Some(chapter_id) = params.chapter_id {
            let chapter = ChapterRepository::new(self.db).find_by_id(chapter_id).await?;
            if chapter.map(|c| c.book_id) != Some(params.book_id) {
                return Err(AppError::NotFound("Chapter not found".to_string()));
            }
        }

        let open = repo.get_active_by_user(user.id).await?;
        let closed = open.len();
        for session in open {
            let ending = SessionEnding::compute(&session, Utc::now(), None, None);
            repo.end(session.id, ending).await?;
        }

        let session = repo.create(params).await?;

        let log = LogService::new(self.db);
        log.record_performance(PerformanceLogParams {
            component: "reading_session_service".to_string(),
            operation: "start_session".to_string(),
            duration_ms: started.elapsed().as_millis() as i64,
            endpoint: client.path.clone(),
            user_id: Some(user.id),
            admin_id: None,
            details: Some(serde_json::json!({
                "session_id": session.id,
                "ended_sessions": closed,
            })),
        })
        .await;
        log.record_user_activity(
            UserActivityLogParams::new(user.id, "START_READING_SESSION", client)
                .resource("reading_session", session.id)
                .metadata(serde_json::json!({ "book_id": session.book_id })),
        )
        .await;

        Ok(session)
    }

    /// Ends one of the caller's active sessions.
    ///
    /// # Returns
    /// - `Ok(ReadingSession)` - The closed session
    /// - `Err(AppError::NotFound)` - No such session for this user
    /// - `Err(AppError::BadRequest)` - Session already ended
    pub async fn end(
        &self,
        user: &User,
        session_id: i32,
        end_page: Option<i32>,
        notes: Option<String>,
        client: &ClientInfo,
    ) -> Result<ReadingSession, AppError> {
        let repo = ReadingSessionRepository::new(self.db);

        let session = repo
            .find_by_id(session_id)
            .await?
            .filter(|s| s.user_id == user.id)
            .ok_or_else(|| AppError::NotFound("Reading session not found".to_string()))?;
        if !session.is_active {
            return Err(AppError::BadRequest(
                "Reading session has already ended".to_string(),
            ));
        }

        let ending = SessionEnding::compute(&session, Utc::now(), end_page, notes);
        let minutes = ending.duration_minutes;
        let session = repo.end(session_id, ending).await?;

        let progress_repo = ReadingProgressRepository::new(self.db);
        if let Some(mut progress) = progress_repo.find(user.id, session.book_id).await? {
            progress.add_reading_time(minutes);
            progress.last_read_at = session.end_time;
            progress_repo.save(&progress).await?;
        }

        LogService::new(self.db)
            .record_user_activity(
                UserActivityLogParams::new(user.id, "END_READING_SESSION", client)
                    .resource("reading_session", session.id)
                    .metadata(serde_json::json!({
                        "book_id": session.book_id,
                        "duration_minutes": minutes,
                        "pages_read": session.pages_read,
                    })),
            )
            .await;

        Ok(session)
    }

    pub async fn get_mine(
        &self,
        user: &User,
        params: PageParams,
    ) -> Result<Page<ReadingSession>, AppError> {
        let (sessions, total) = ReadingSessionRepository::new(self.db)
            .get_by_user_paginated(user.id, params.page, params.per_page)
            .await?;

        Ok(Page::new(sessions, total, params))
    }
}
