use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::book::BookDto;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FavoriteDto {
    pub id: i32,
    pub book_id: i32,
    pub created_at: DateTime<Utc>,
    pub book: Option<BookDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FavoriteStatusDto {
    pub book_id: i32,
    pub is_favorite: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FavoriteCountDto {
    pub book_id: i32,
    pub count: u64,
}
