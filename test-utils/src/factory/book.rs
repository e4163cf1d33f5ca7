//! Book factory for creating test book entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test books with customizable fields.
///
/// The author and category must already exist; see
/// `helpers::create_book_with_dependencies` for a one-call setup.
///
/// # Example
///
/// ```rust,ignore
/// let book = BookFactory::new(&db, author.id, category.id)
///     .title("Dune")
///     .free(true)
///     .build()
///     .await?;
/// ```
pub struct BookFactory<'a> {
    db: &'a DatabaseConnection,
    author_id: i32,
    category_id: i32,
    title: String,
    description: Option<String>,
    isbn: Option<String>,
    pages: Option<i32>,
    is_free: bool,
    is_active: bool,
}

impl<'a> BookFactory<'a> {
    /// Creates a new BookFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Book {id}"`
    /// - pages: `Some(200)`
    /// - is_free: `false`
    /// - is_active: `true`
    pub fn new(db: &'a DatabaseConnection, author_id: i32, category_id: i32) -> Self {
        Self {
            db,
            author_id,
            category_id,
            title: format!("Book {}", next_id()),
            description: None,
            isbn: None,
            pages: Some(200),
            is_free: false,
            is_active: true,
        }
    }

    /// Sets the book title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the book description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the ISBN.
    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    /// Sets the page count.
    pub fn pages(mut self, pages: Option<i32>) -> Self {
        self.pages = pages;
        self
    }

    /// Sets whether the book is free to read.
    pub fn free(mut self, is_free: bool) -> Self {
        self.is_free = is_free;
        self
    }

    /// Sets whether the book is listed publicly.
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the book entity into the database.
    pub async fn build(self) -> Result<entity::book::Model, DbErr> {
        let now = Utc::now();
        entity::book::ActiveModel {
            title: ActiveValue::Set(self.title),
            isbn: ActiveValue::Set(self.isbn),
            description: ActiveValue::Set(self.description),
            publication_date: ActiveValue::Set(None),
            pages: ActiveValue::Set(self.pages),
            language: ActiveValue::Set(Some("en".to_string())),
            cover_url: ActiveValue::Set(None),
            pdf_url: ActiveValue::Set(None),
            epub_url: ActiveValue::Set(None),
            price: ActiveValue::Set(None),
            is_free: ActiveValue::Set(self.is_free),
            is_active: ActiveValue::Set(self.is_active),
            author_id: ActiveValue::Set(self.author_id),
            category_id: ActiveValue::Set(self.category_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a book with default values for the given author and category.
pub async fn create_book(
    db: &DatabaseConnection,
    author_id: i32,
    category_id: i32,
) -> Result<entity::book::Model, DbErr> {
    BookFactory::new(db, author_id, category_id).build().await
}
