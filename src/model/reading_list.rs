use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingListDto {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Books in `order_index` order
    pub items: Vec<ReadingListItemDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingListItemDto {
    pub id: i32,
    pub book_id: i32,
    pub book_title: Option<String>,
    pub order_index: i32,
    pub notes: Option<String>,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReadingListDto {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReadingListDto {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddReadingListBookDto {
    pub book_id: i32,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// New ordering for a list, as book ids from first to last.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReorderReadingListDto {
    #[validate(length(min = 1, message = "must list at least one book"))]
    pub book_ids: Vec<i32>,
}
