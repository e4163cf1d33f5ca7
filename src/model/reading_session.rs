use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReadingSessionDto {
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

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StartSessionDto {
    pub book_id: i32,
    pub chapter_id: Option<i32>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub start_page: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EndSessionDto {
    #[validate(range(min = 0, message = "must not be negative"))]
    pub end_page: Option<i32>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}
