use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::{author::AuthorDto, book::BookDto, category::CategoryDto};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Search text, matched case-insensitively
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub page: u64,
    pub per_page: Option<u64>,
    pub category_id: Option<i32>,
    pub author_id: Option<i32>,
    pub is_free: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchAllDto {
    pub query: String,
    pub books: Vec<BookDto>,
    pub authors: Vec<AuthorDto>,
    pub categories: Vec<CategoryDto>,
    pub total: u64,
}
