//! Book catalog service.
//!
//! Books reference an author and a category; both are checked before a write so a bad
//! reference is reported as 404 rather than as a foreign key failure.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{author::AuthorRepository, book::BookRepository, category::CategoryRepository},
    error::AppError,
    model::{
        book::{Book, BookFilter, CreateBookParams, UpdateBookParams},
        log::{AdminAction, AdminActivityLogParams, ClientInfo},
        page::{Page, PageParams},
        user::User,
    },
    service::log::LogService,
};

pub struct BookService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BookService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        params: PageParams,
        filter: &BookFilter,
    ) -> Result<Page<Book>, AppError> {
        let (books, total) = BookRepository::new(self.db)
            .get_paginated(params.page, params.per_page, filter)
            .await?;

        Ok(Page::new(books, total, params))
    }

    /// Gets a book with author and category names.
    ///
    /// # Arguments
    /// - `id` - Book id
    /// - `include_inactive` - Whether deactivated books are visible to the caller
    pub async fn get_by_id(&self, id: i32, include_inactive: bool) -> Result<Book, AppError> {
        BookRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|b| include_inactive || b.is_active)
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Creates a book after checking its references and ISBN.
    ///
    /// # Returns
    /// - `Ok(Book)` - Created book
    /// - `Err(AppError::NotFound)` - Author or category does not exist
    /// - `Err(AppError::Conflict)` - ISBN already used by another book
    pub async fn create(
        &self,
        admin: &User,
        params: CreateBookParams,
        client: &ClientInfo,
    ) -> Result<Book, AppError> {
        self.check_references(Some(params.author_id), Some(params.category_id))
            .await?;
        self.check_isbn(params.isbn.as_deref(), None).await?;

        let book = BookRepository::new(self.db).create(params).await?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Create, "book", client)
                    .resource_id(book.id)
                    .after(book.audit_snapshot()),
            )
            .await;

        Ok(book)
    }

    pub async fn update(
        &self,
        admin: &User,
        id: i32,
        params: UpdateBookParams,
        client: &ClientInfo,
    ) -> Result<Book, AppError> {
        let before = self.get_by_id(id, true).await?;

        self.check_references(params.author_id, params.category_id)
            .await?;
        if let Some(isbn) = &params.isbn {
            self.check_isbn(isbn.as_deref(), Some(id)).await?;
        }

        let book = BookRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Update, "book", client)
                    .resource_id(id)
                    .before(before.audit_snapshot())
                    .after(book.audit_snapshot()),
            )
            .await;

        Ok(book)
    }

    pub async fn delete(&self, admin: &User, id: i32, client: &ClientInfo) -> Result<(), AppError> {
        let before = self.get_by_id(id, true).await?;

        BookRepository::new(self.db).delete(id).await?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Delete, "book", client)
                    .resource_id(id)
                    .before(before.audit_snapshot()),
            )
            .await;

        Ok(())
    }

    async fn check_references(
        &self,
        author_id: Option<i32>,
        category_id: Option<i32>,
    ) -> Result<(), AppError> {
        if let Some(author_id) = author_id {
            if !AuthorRepository::new(self.db).exists(author_id).await? {
                return Err(AppError::NotFound(format!("Author {} not found", author_id)));
            }
        }
        if let Some(category_id) = category_id {
            if !CategoryRepository::new(self.db).exists(category_id).await? {
                return Err(AppError::NotFound(format!(
                    "Category {} not found",
                    category_id
                )));
            }
        }

        Ok(())
    }

    async fn check_isbn(&self, isbn: Option<&str>, except: Option<i32>) -> Result<(), AppError> {
        let Some(isbn) = isbn else {
            return Ok(());
        };

        let existing = BookRepository::new(self.db).find_by_isbn(isbn).await?;
        match existing {
            Some(book) if Some(book.id) != except => Err(AppError::Conflict(
                "A book with this ISBN already exists".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
