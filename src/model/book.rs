use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookDto {
    pub id: i32,
    pub title: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub pages: Option<i32>,
    pub language: Option<String>,
    pub cover_url: Option<String>,
    pub pdf_url: Option<String>,
    pub epub_url: Option<String>,
    pub price: Option<f64>,
    pub is_free: bool,
    pub is_active: bool,
    pub author_id: i32,
    pub category_id: i32,
    /// Present on detail and listing responses
    pub author_name: Option<String>,
    /// Present on detail and listing responses
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookDto {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub title: String,
    pub author_id: i32,
    pub category_id: i32,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<NaiveDate>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub pages: Option<i32>,
    #[validate(length(max = 10))]
    pub language: Option<String>,
    pub cover_url: Option<String>,
    pub pdf_url: Option<String>,
    pub epub_url: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: Option<f64>,
    pub is_free: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookDto {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub title: Option<String>,
    pub author_id: Option<i32>,
    pub category_id: Option<i32>,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<NaiveDate>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub pages: Option<i32>,
    #[validate(length(max = 10))]
    pub language: Option<String>,
    pub cover_url: Option<String>,
    pub pdf_url: Option<String>,
    pub epub_url: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: Option<f64>,
    pub is_free: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookListQuery {
    #[serde(default)]
    pub page: u64,
    pub per_page: Option<u64>,
    pub category_id: Option<i32>,
    pub author_id: Option<i32>,
    pub is_free: Option<bool>,
}
