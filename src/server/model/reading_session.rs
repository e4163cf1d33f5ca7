use chrono::{DateTime, Utc};

use crate::model::reading_session::ReadingSessionDto;

#[derive(Debug, Clone, PartialEq)]
pub struct ReadingSession {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub chapter_id: Option<i32>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub start_page: Option<i32>,
    pub end_page: Option<i32>,
    pub pages_read: Option<i32>,
    pub is_active: bool,
    pub notes: Option<String>,
}

impl ReadingSession {
    pub fn into_dto(self) -> ReadingSessionDto {
        ReadingSessionDto {
            id: self.id,
            user_id: self.user_id,
            book_id: self.book_id,
            chapter_id: self.chapter_id,
            start_time: self.start_time,
            end_time: self.end_time,
            duration_minutes: self.duration_minutes,
            start_page: self.start_page,
            end_page: self.end_page,
            pages_read: self.pages_read,
            is_active: self.is_active,
            notes: self.notes,
        }
    }

    pub fn from_entity(entity: entity::reading_session::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            book_id: entity.book_id,
            chapter_id: entity.chapter_id,
            start_time: entity.start_time,
            end_time: entity.end_time,
            duration_minutes: entity.duration_minutes,
            start_page: entity.start_page,
            end_page: entity.end_page,
            pages_read: entity.pages_read,
            is_active: entity.is_active,
            notes: entity.notes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StartSessionParams {
    pub user_id: i32,
    pub book_id: i32,
    pub chapter_id: Option<i32>,
    pub start_page: Option<i32>,
}

/// Values written when a session is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEnding {
    pub end_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub end_page: Option<i32>,
    pub pages_read: Option<i32>,
    pub notes: Option<String>,
}

impl SessionEnding {
    /// Derives the closing values for `session` at `now`.
    ///
    /// Duration is whole minutes, never negative. Pages read is only known when both the
    /// start and end pages are, and never negative.
    pub fn compute(
        session: &ReadingSession,
        now: DateTime<Utc>,
        end_page: Option<i32>,
        notes: Option<String>,
    ) -> Self {
        let duration_minutes =
            i32::try_from((now - session.start_time).num_minutes().max(0)).unwrap_or(i32::MAX);
        let pages_read = match (session.start_page, end_page) {
            (Some(start), Some(end)) => Some(end.saturating_sub(start).max(0)),
            _ => None,
        };

        Self {
            end_time: now,
            duration_minutes,
            end_page,
            pages_read,
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ending_computes_duration_and_pages() {
        let start = Utc::now();
        let session = ReadingSession {
            id: 1,
            user_id: 1,
            book_id: 1,
            chapter_id: None,
            start_time: start,
            end_time: None,
            duration_minutes: None,
            start_page: Some(10),
            end_page: None,
            pages_read: None,
            is_active: true,
            notes: None,
        };

        let ending = SessionEnding::compute(
            &session,
            start + chrono::Duration::minutes(42),
            Some(35),
            None,
        );
        assert_eq!(ending.duration_minutes, 42);
        assert_eq!(ending.pages_read, Some(25));

        let backwards = SessionEnding::compute(&session, start, Some(5), None);
        assert_eq!(backwards.pages_read, Some(0));
        assert_eq!(backwards.duration_minutes, 0);
    }
}
