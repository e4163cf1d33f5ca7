use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatusDto {
    NotStarted,
    Reading,
    Completed,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReadingProgressDto {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub current_page: i32,
    pub total_pages: Option<i32>,
    pub progress_percentage: f64,
    pub reading_time_minutes: i32,
    pub status: ReadingStatusDto,
    pub is_completed: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub last_read_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReadingProgressDto {
    pub book_id: i32,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub current_page: Option<i32>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub total_pages: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReadingProgressDto {
    #[validate(range(min = 0, message = "must not be negative"))]
    pub current_page: Option<i32>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub total_pages: Option<i32>,
    pub status: Option<ReadingStatusDto>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub reading_time_minutes: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingStatsDto {
    pub total_books: u64,
    pub completed_books: u64,
    pub currently_reading: u64,
    pub total_reading_minutes: i64,
    pub average_progress: f64,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProgressListQuery {
    #[serde(default)]
    pub page: u64,
    pub per_page: Option<u64>,
    pub status: Option<ReadingStatusDto>,
}
