//! Reading progress domain models.
//!
//! Progress is tracked per (user, book). The completion rules live in
//! [`ProgressUpdate::apply`] so the service and its tests share one definition of how
//! pages turn into a percentage and a status.

use chrono::{DateTime, Utc};

use crate::{
    model::reading_progress::{
        CreateReadingProgressDto, ReadingProgressDto, ReadingStatsDto, ReadingStatusDto,
        UpdateReadingProgressDto,
    },
    server::util::text::patch_text,
};

/// Lifecycle state of a user's progress through a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingStatus {
    NotStarted,
    Reading,
    Completed,
    Paused,
}

impl ReadingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Reading => "reading",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }

    /// Parses a stored status, treating unknown values as not started.
    pub fn from_db(value: &str) -> Self {
        match value {
            "reading" => Self::Reading,
            "completed" => Self::Completed,
            "paused" => Self::Paused,
            _ => Self::NotStarted,
        }
    }

    pub fn from_dto(dto: ReadingStatusDto) -> Self {
        match dto {
            ReadingStatusDto::NotStarted => Self::NotStarted,
            ReadingStatusDto::Reading => Self::Reading,
            ReadingStatusDto::Completed => Self::Completed,
            ReadingStatusDto::Paused => Self::Paused,
        }
    }

    pub fn into_dto(self) -> ReadingStatusDto {
        match self {
            Self::NotStarted => ReadingStatusDto::NotStarted,
            Self::Reading => ReadingStatusDto::Reading,
            Self::Completed => ReadingStatusDto::Completed,
            Self::Paused => ReadingStatusDto::Paused,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadingProgress {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub current_page: i32,
    pub total_pages: Option<i32>,
    pub progress_percentage: f64,
    pub reading_time_minutes: i32,
    pub status: ReadingStatus,
    pub is_completed: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub last_read_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReadingProgress {
    /// Adds the minutes of a finished session, saturating at `i32::MAX`.
    pub fn add_reading_time(&mut self, minutes: i32) {
        self.reading_time_minutes = self.reading_time_minutes.saturating_add(minutes.max(0));
    }

    pub fn into_dto(self) -> ReadingProgressDto {
        ReadingProgressDto {
            id: self.id,
            user_id: self.user_id,
            book_id: self.book_id,
            current_page: self.current_page,
            total_pages: self.total_pages,
            progress_percentage: self.progress_percentage,
            reading_time_minutes: self.reading_time_minutes,
            status: self.status.into_dto(),
            is_completed: self.is_completed,
            started_at: self.started_at,
            completed_at: self.completed_at,
            last_read_at: self.last_read_at,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn from_entity(entity: entity::reading_progress::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            book_id: entity.book_id,
            current_page: entity.current_page,
            total_pages: entity.total_pages,
            progress_percentage: entity.progress_percentage,
            reading_time_minutes: entity.reading_time_minutes,
            status: ReadingStatus::from_db(&entity.status),
            is_completed: entity.is_completed,
            started_at: entity.started_at,
            completed_at: entity.completed_at,
            last_read_at: entity.last_read_at,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Requested change to a progress record.
#[derive(Debug, Clone, Default)]
pub struct ProgressUpdate {
    pub current_page: Option<i32>,
    pub total_pages: Option<i32>,
    pub status: Option<ReadingStatus>,
    pub reading_time_minutes: Option<i32>,
    pub notes: Option<Option<String>>,
}

/// Computes `current / total * 100` rounded to 2 decimals and capped at 100.
pub fn progress_percentage(current_page: i32, total_pages: Option<i32>) -> f64 {
    match total_pages {
        Some(total) if total > 0 => {
            let raw = current_page.max(0) as f64 / total as f64 * 100.0;
            ((raw * 100.0).round() / 100.0).min(100.0)
        }
        _ => 0.0,
    }
}

impl ProgressUpdate {
    pub fn from_dto(dto: UpdateReadingProgressDto) -> Self {
        Self {
            current_page: dto.current_page,
            total_pages: dto.total_pages,
            status: dto.status.map(ReadingStatus::from_dto),
            reading_time_minutes: dto.reading_time_minutes,
            notes: patch_text(dto.notes),
        }
    }

    /// Update carried by a create request, applied on top of a new or existing record.
    pub fn from_create_dto(dto: CreateReadingProgressDto) -> Self {
        Self {
            current_page: dto.current_page,
            total_pages: dto.total_pages,
            notes: patch_text(dto.notes),
            ..Default::default()
        }
    }

    /// Applies the update to `progress`, recomputing derived fields.
    ///
    /// Reaching or passing the last page completes the book: the percentage becomes
    /// 100, the status `completed`, and `completed_at` is stamped the first time. Any
    /// positive page short of that moves the record to `reading` and stamps
    /// `started_at` once. An explicit status is honored unless the pages say the book
    /// is complete. `last_read_at` is refreshed on every call.
    pub fn apply(self, progress: &mut ReadingProgress, now: DateTime<Utc>) {
        if let Some(total) = self.total_pages {
            progress.total_pages = Some(total);
        }
        if let Some(page) = self.current_page {
            progress.current_page = page.max(0);
        }
        if let Some(minutes) = self.reading_time_minutes {
            progress.reading_time_minutes = minutes.max(0);
        }
        if let Some(notes) = self.notes {
            progress.notes = notes;
        }

        progress.progress_percentage =
            progress_percentage(progress.current_page, progress.total_pages);

        let finished = matches!(progress.total_pages, Some(total) if total > 0 && progress.current_page >= total);

        if finished || self.status == Some(ReadingStatus::Completed) {
            progress.is_completed = true;
            progress.status = ReadingStatus::Completed;
            progress.progress_percentage = 100.0;
            if progress.completed_at.is_none() {
                progress.completed_at = Some(now);
            }
            if progress.started_at.is_none() {
                progress.started_at = Some(now);
            }
        } else {
            progress.is_completed = false;
            progress.completed_at = None;
            progress.status = match self.status {
                Some(status) => status,
                None if progress.current_page > 0 => ReadingStatus::Reading,
                None => progress.status,
            };
            if progress.current_page > 0 && progress.started_at.is_none() {
                progress.started_at = Some(now);
            }
        }

        progress.last_read_at = Some(now);
    }
}

/// Aggregates over all of a user's progress records.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingStats {
    pub total_books: u64,
    pub completed_books: u64,
    pub currently_reading: u64,
    pub total_reading_minutes: i64,
    pub average_progress: f64,
}

impl ReadingStats {
    pub fn from_progress(records: &[ReadingProgress]) -> Self {
        let total_books = records.len() as u64;
        let completed_books = records.iter().filter(|p| p.is_completed).count() as u64;
        let currently_reading = records
            .iter()
            .filter(|p| p.status == ReadingStatus::Reading)
            .count() as u64;
        let total_reading_minutes = records
            .iter()
            .map(|p| p.reading_time_minutes as i64)
            .sum();
        let average_progress = if records.is_empty() {
            0.0
        } else {
            let sum: f64 = records.iter().map(|p| p.progress_percentage).sum();
            ((sum / records.len() as f64) * 100.0).round() / 100.0
        };

        Self {
            total_books,
            completed_books,
            currently_reading,
            total_reading_minutes,
            average_progress,
        }
    }

    pub fn into_dto(self) -> ReadingStatsDto {
        ReadingStatsDto {
            total_books: self.total_books,
            completed_books: self.completed_books,
            currently_reading: self.currently_reading,
            total_reading_minutes: self.total_reading_minutes,
            average_progress: self.average_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(total_pages: Option<i32>) -> ReadingProgress {
        let now = Utc::now();
        ReadingProgress {
            id: 1,
            user_id: 1,
            book_id: 1,
            current_page: 0,
            total_pages,
            progress_percentage: 0.0,
            reading_time_minutes: 0,
            status: ReadingStatus::NotStarted,
            is_completed: false,
            started_at: None,
            completed_at: None,
            last_read_at: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn percentage_is_rounded_and_capped() {
        assert_eq!(progress_percentage(1, Some(3)), 33.33);
        assert_eq!(progress_percentage(50, Some(200)), 25.0);
        assert_eq!(progress_percentage(250, Some(200)), 100.0);
        assert_eq!(progress_percentage(10, None), 0.0);
        assert_eq!(progress_percentage(10, Some(0)), 0.0);
    }

    #[test]
    fn partial_read_moves_to_reading_and_stamps_start_once() {
        let mut progress = blank(Some(300));
        let first = Utc::now();

        ProgressUpdate {
            current_page: Some(30),
            ..Default::default()
        }
        .apply(&mut progress, first);

        assert_eq!(progress.status, ReadingStatus::Reading);
        assert_eq!(progress.progress_percentage, 10.0);
        assert_eq!(progress.started_at, Some(first));
        assert!(!progress.is_completed);

        let later = first + chrono::Duration::minutes(5);
        ProgressUpdate {
            current_page: Some(60),
            ..Default::default()
        }
        .apply(&mut progress, later);

        assert_eq!(progress.started_at, Some(first));
        assert_eq!(progress.last_read_at, Some(later));
    }

    #[test]
    fn reaching_last_page_completes() {
        let mut progress = blank(Some(120));
        let now = Utc::now();

        ProgressUpdate {
            current_page: Some(130),
            ..Default::default()
        }
        .apply(&mut progress, now);

        assert!(progress.is_completed);
        assert_eq!(progress.status, ReadingStatus::Completed);
        assert_eq!(progress.progress_percentage, 100.0);
        assert_eq!(progress.completed_at, Some(now));
    }

    #[test]
    fn stats_aggregate_records() {
        let mut reading = blank(Some(100));
        reading.status = ReadingStatus::Reading;
        reading.progress_percentage = 50.0;
        reading.reading_time_minutes = 30;

        let mut done = blank(Some(100));
        done.is_completed = true;
        done.status = ReadingStatus::Completed;
        done.progress_percentage = 100.0;
        done.reading_time_minutes = 90;

        let stats = ReadingStats::from_progress(&[reading, done]);

        assert_eq!(stats.total_books, 2);
        assert_eq!(stats.completed_books, 1);
        assert_eq!(stats.currently_reading, 1);
        assert_eq!(stats.total_reading_minutes, 120);
        assert_eq!(stats.average_progress, 75.0);
    }

    #[test]
    fn reading_time_saturates() {
        let mut progress = blank(Some(100));
        progress.add_reading_time(30);
        assert_eq!(progress.reading_time_minutes, 30);

        progress.reading_time_minutes = i32::MAX - 5;
        progress.add_reading_time(60);
        assert_eq!(progress.reading_time_minutes, i32::MAX);
    }
}
