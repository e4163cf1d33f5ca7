use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewDto {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub rating: i32,
    pub title: Option<String>,
    pub content: String,
    pub contains_spoilers: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewDto {
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 10000, message = "must be between 1 and 10000 characters"))]
    pub content: String,
    pub contains_spoilers: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewDto {
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub rating: Option<i32>,
    #[validate(length(max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 10000, message = "must be between 1 and 10000 characters"))]
    pub content: Option<String>,
    pub contains_spoilers: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookRatingDto {
    pub book_id: i32,
    /// Mean rating, absent when the book has no reviews
    pub average_rating: Option<f64>,
    pub review_count: u64,
}
