//! Book domain models and parameters.
//!
//! A book belongs to exactly one author and one category. Listing and detail reads
//! enrich the book with the author and category names so clients can render a card
//! without extra round trips.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    model::book::{BookDto, CreateBookDto, UpdateBookDto},
    server::util::text::{non_empty, patch_text},
};

/// Book with optional display names of its author and category.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
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
    /// Filled in by reads that join the author.
    pub author_name: Option<String>,
    /// Filled in by reads that join the category.
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Converts the book domain model to a DTO for API responses.
    pub fn into_dto(self) -> BookDto {
        BookDto {
            id: self.id,
            title: self.title,
            isbn: self.isbn,
            description: self.description,
            publication_date: self.publication_date,
            pages: self.pages,
            language: self.language,
            cover_url: self.cover_url,
            pdf_url: self.pdf_url,
            epub_url: self.epub_url,
            price: self.price,
            is_free: self.is_free,
            is_active: self.is_active,
            author_id: self.author_id,
            category_id: self.category_id,
            author_name: self.author_name,
            category_name: self.category_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// JSON snapshot used for admin activity before/after state.
    pub fn audit_snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "title": self.title,
            "isbn": self.isbn,
            "author_id": self.author_id,
            "category_id": self.category_id,
            "is_free": self.is_free,
            "is_active": self.is_active,
        })
    }

    /// Converts an entity model to a book domain model without display names.
    pub fn from_entity(entity: entity::book::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            isbn: entity.isbn,
            description: entity.description,
            publication_date: entity.publication_date,
            pages: entity.pages,
            language: entity.language,
            cover_url: entity.cover_url,
            pdf_url: entity.pdf_url,
            epub_url: entity.epub_url,
            price: entity.price,
            is_free: entity.is_free,
            is_active: entity.is_active,
            author_id: entity.author_id,
            category_id: entity.category_id,
            author_name: None,
            category_name: None,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Attaches display names resolved from the joined author and category rows.
    pub fn with_names(mut self, author_name: Option<String>, category_name: Option<String>) -> Self {
        self.author_name = author_name;
        self.category_name = category_name;
        self
    }
}

/// Parameters for creating a book.
///
/// Blank optional strings are normalized to `None` so they are stored as NULL, which
/// keeps the unique ISBN index from colliding on empty strings.
#[derive(Debug, Clone)]
pub struct CreateBookParams {
    pub title: String,
    pub author_id: i32,
    pub category_id: i32,
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
}

impl CreateBookParams {
    pub fn from_dto(dto: CreateBookDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            author_id: dto.author_id,
            category_id: dto.category_id,
            isbn: non_empty(dto.isbn),
            description: non_empty(dto.description),
            publication_date: dto.publication_date,
            pages: dto.pages,
            language: non_empty(dto.language),
            cover_url: non_empty(dto.cover_url),
            pdf_url: non_empty(dto.pdf_url),
            epub_url: non_empty(dto.epub_url),
            price: dto.price,
            is_free: dto.is_free.unwrap_or(false),
            is_active: dto.is_active.unwrap_or(true),
        }
    }
}

/// Column patch for a book. `None` leaves a column unchanged; `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateBookParams {
    pub title: Option<String>,
    pub author_id: Option<i32>,
    pub category_id: Option<i32>,
    pub isbn: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub publication_date: Option<NaiveDate>,
    pub pages: Option<i32>,
    pub language: Option<Option<String>>,
    pub cover_url: Option<Option<String>>,
    pub pdf_url: Option<Option<String>>,
    pub epub_url: Option<Option<String>>,
    pub price: Option<f64>,
    pub is_free: Option<bool>,
    pub is_active: Option<bool>,
}

impl UpdateBookParams {
    pub fn from_dto(dto: UpdateBookDto) -> Self {
        Self {
            title: dto.title.map(|t| t.trim().to_string()),
            author_id: dto.author_id,
            category_id: dto.category_id,
            isbn: patch_text(dto.isbn),
            description: patch_text(dto.description),
            publication_date: dto.publication_date,
            pages: dto.pages,
            language: patch_text(dto.language),
            cover_url: patch_text(dto.cover_url),
            pdf_url: patch_text(dto.pdf_url),
            epub_url: patch_text(dto.epub_url),
            price: dto.price,
            is_free: dto.is_free,
            is_active: dto.is_active,
        }
    }
}

/// Filters shared by the book listing and the book search.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub category_id: Option<i32>,
    pub author_id: Option<i32>,
    pub is_free: Option<bool>,
    /// Restrict to active books; public endpoints always set this
    pub active_only: bool,
    /// Case-insensitive substring matched against title and description
    pub text: Option<String>,
}

impl BookFilter {
    /// JSON form of the filters recorded alongside search logs.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "category_id": self.category_id,
            "author_id": self.author_id,
            "is_free": self.is_free,
        })
    }
}
