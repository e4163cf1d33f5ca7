use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChapterDto {
    pub id: i32,
    pub book_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub chapter_number: i32,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateChapterDto {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub title: String,
    pub content: Option<String>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub chapter_number: i32,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateChapterDto {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub title: Option<String>,
    pub content: Option<String>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub chapter_number: Option<i32>,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
    pub is_active: Option<bool>,
}
