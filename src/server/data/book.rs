//! Book data repository.
//!
//! Provides `BookRepository` for book CRUD, filtered listings and text search. Reads that
//! return books to clients resolve author and category names in one batched query per
//! table rather than per row.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::server::model::book::{Book, BookFilter, CreateBookParams, UpdateBookParams};
use crate::server::data::text_match::contains_any;

pub struct BookRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BookRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new book.
    ///
    /// # Arguments
    /// - `params` - Book fields; referenced author and category must exist
    ///
    /// # Returns
    /// - `Ok(Book)` - The created book with author and category names resolved
    /// - `Err(DbErr)` - Database error, including a unique violation on ISBN
    pub async fn create(&self, params: CreateBookParams) -> Result<Book, DbErr> {
        let now = Utc::now();

        let entity = entity::book::ActiveModel {
            title: ActiveValue::Set(params.title),
            isbn: ActiveValue::Set(params.isbn),
            description: ActiveValue::Set(params.description),
            publication_date: ActiveValue::Set(params.publication_date),
            pages: ActiveValue::Set(params.pages),
            language: ActiveValue::Set(params.language),
            cover_url: ActiveValue::Set(params.cover_url),
            pdf_url: ActiveValue::Set(params.pdf_url),
            epub_url: ActiveValue::Set(params.epub_url),
            price: ActiveValue::Set(params.price),
            is_free: ActiveValue::Set(params.is_free),
            is_active: ActiveValue::Set(params.is_active),
            author_id: ActiveValue::Set(params.author_id),
            category_id: ActiveValue::Set(params.category_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut books = self.with_names(vec![entity]).await?;

        books
            .pop()
            .ok_or_else(|| DbErr::RecordNotFound("Book not found after creation".to_string()))
    }

    /// Gets a book by id with author and category names.
    ///
    /// # Returns
    /// - `Ok(Some(Book))` - Book found
    /// - `Ok(None)` - No book with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DbErr> {
        let Some(entity) = entity::prelude::Book::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(self.with_names(vec![entity]).await?.pop())
    }

    pub async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>, DbErr> {
        let entity = entity::prelude::Book::find()
            .filter(entity::book::Column::Isbn.eq(isbn))
            .one(self.db)
            .await?;

        Ok(entity.map(Book::from_entity))
    }

    /// Gets books newest first with pagination.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of books per page
    /// - `filter` - Category, author, free and active filters plus an optional text match
    ///
    /// # Returns
    /// - `Ok((books, total))` - Books for the requested page and the total matching count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        page: u64,
        per_page: u64,
        filter: &BookFilter,
    ) -> Result<(Vec<Book>, u64), DbErr> {
        let paginator = Self::filtered(self.db.get_database_backend(), filter)
            .order_by_desc(entity::book::Column::CreatedAt)
            .order_by_desc(entity::book::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((self.with_names(entities).await?, total))
    }

    /// Loads books by id, preserving no particular order.
    pub async fn get_by_ids(&self, ids: Vec<i32>) -> Result<Vec<Book>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Book::find()
            .filter(entity::book::Column::Id.is_in(ids))
            .all(self.db)
            .await?;

        self.with_names(entities).await
    }

    /// Applies a column patch to a book.
    ///
    /// # Returns
    /// - `Ok(Some(Book))` - Updated book with names resolved
    /// - `Ok(None)` - No book with that id
    /// - `Err(DbErr)` - Database error, including a unique violation on ISBN
    pub async fn update(&self, id: i32, params: UpdateBookParams) -> Result<Option<Book>, DbErr> {
        let Some(model) = entity::prelude::Book::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::book::ActiveModel = model.into();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(author_id) = params.author_id {
            active.author_id = ActiveValue::Set(author_id);
        }
        if let Some(category_id) = params.category_id {
            active.category_id = ActiveValue::Set(category_id);
        }
        if let Some(isbn) = params.isbn {
            active.isbn = ActiveValue::Set(isbn);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(publication_date) = params.publication_date {
            active.publication_date = ActiveValue::Set(Some(publication_date));
        }
        if let Some(pages) = params.pages {
            active.pages = ActiveValue::Set(Some(pages));
        }
        if let Some(language) = params.language {
            active.language = ActiveValue::Set(language);
        }
        if let Some(cover_url) = params.cover_url {
            active.cover_url = ActiveValue::Set(cover_url);
        }
        if let Some(pdf_url) = params.pdf_url {
            active.pdf_url = ActiveValue::Set(pdf_url);
        }
        if let Some(epub_url) = params.epub_url {
            active.epub_url = ActiveValue::Set(epub_url);
        }
        if let Some(price) = params.price {
            active.price = ActiveValue::Set(Some(price));
        }
        if let Some(is_free) = params.is_free {
            active.is_free = ActiveValue::Set(is_free);
        }
        if let Some(is_active) = params.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(self.with_names(vec![entity]).await?.pop())
    }

    /// Deletes a book; chapters, reviews, favorites and progress cascade.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Book::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Book::find()
            .filter(entity::book::Column::Id.eq(id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Counts books matching `filter`.
    pub async fn count(&self, filter: &BookFilter) -> Result<u64, DbErr> {
        Self::filtered(self.db.get_database_backend(), filter).count(self.db).await
    }

    fn filtered(backend: DbBackend, filter: &BookFilter) -> Select<entity::book::Entity> {
        let mut query = entity::prelude::Book::find();

        if filter.active_only {
            query = query.filter(entity::book::Column::IsActive.eq(true));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(entity::book::Column::CategoryId.eq(category_id));
        }
        if let Some(author_id) = filter.author_id {
            query = query.filter(entity::book::Column::AuthorId.eq(author_id));
        }
        if let Some(is_free) = filter.is_free {
            query = query.filter(entity::book::Column::IsFree.eq(is_free));
        }
        if let Some(text) = filter.text.as_deref() {
            query = query.filter(contains_any(
                backend,
                &[entity::book::Column::Title, entity::book::Column::Description],
                text,
            ));
        }

        query
    }

    /// Resolves author and category names for a batch of book rows.
    async fn with_names(&self, entities: Vec<entity::book::Model>) -> Result<Vec<Book>, DbErr> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: Vec<i32> = entities.iter().map(|b| b.author_id).collect();
        let category_ids: Vec<i32> = entities.iter().map(|b| b.category_id).collect();

        let authors: HashMap<i32, String> = entity::prelude::Author::find()
            .filter(entity::author::Column::Id.is_in(author_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|a| (a.id, a.name))
            .collect();

        let categories: HashMap<i32, String> = entity::prelude::Category::find()
            .filter(entity::category::Column::Id.is_in(category_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(entities
            .into_iter()
            .map(|entity| {
                let author_name = authors.get(&entity.author_id).cloned();
                let category_name = categories.get(&entity.category_id).cloned();
                Book::from_entity(entity).with_names(author_name, category_name)
            })
            .collect())
    }
}
