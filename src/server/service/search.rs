//! Catalog search.
//!
//! Each search writes one search log entry recording the query, the target, the number
//! of results, the caller when known, the filters and how long the query took.

use std::time::Instant;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{author::AuthorRepository, book::BookRepository, category::CategoryRepository},
    error::AppError,
    model::{
        author::Author,
        book::{Book, BookFilter},
        category::Category,
        log::SearchLogParams,
        page::{Page, PageParams},
        search::{SearchAll, SearchType},
    },
    service::log::LogService,
};

pub struct SearchService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SearchService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Searches active books by title or description.
    ///
    /// # Arguments
    /// - `query` - Search text; must not be blank
    /// - `filter` - Category, author and free filters; `text` and `active_only` are set here
    /// - `params` - Page number and size
    /// - `user_id` - Caller, when a valid bearer token was sent
    ///
    /// # Returns
    /// - `Ok(Page<Book>)` - Matching books newest first
    /// - `Err(AppError::Validation)` - Blank query
    pub async fn books(
        &self,
        query: &str,
        mut filter: BookFilter,
        params: PageParams,
        user_id: Option<i32>,
    ) -> Result<Page<Book>, AppError> {
        let started = Instant::now();
        let query = normalize(query)?;

        filter.text = Some(query.clone());
        filter.active_only = true;

        let (books, total) = BookRepository::new(self.db)
            .get_paginated(params.page, params.per_page, &filter)
            .await?;

        self.record(
            query,
            SearchType::Books,
            total,
            user_id,
            Some(filter.to_json()),
            started,
        )
        .await;

        Ok(Page::new(books, total, params))
    }

    /// Searches authors by name, returning at most `limit` results.
    pub async fn authors(
        &self,
        query: &str,
        limit: u64,
        user_id: Option<i32>,
    ) -> Result<Vec<Author>, AppError> {
        let started = Instant::now();
        let query = normalize(query)?;

        let authors = AuthorRepository::new(self.db).search(&query, limit).await?;

        self.record(
            query,
            SearchType::Authors,
            authors.len() as u64,
            user_id,
            None,
            started,
        )
        .await;

        Ok(authors)
    }

    /// Searches active categories by name or description, returning at most `limit`.
    pub async fn categories(
        &self,
        query: &str,
        limit: u64,
        user_id: Option<i32>,
    ) -> Result<Vec<Category>, AppError> {
        let started = Instant::now();
        let query = normalize(query)?;

        let categories = CategoryRepository::new(self.db)
            .search(&query, limit)
            .await?;

        self.record(
            query,
            SearchType::Categories,
            categories.len() as u64,
            user_id,
            None,
            started,
        )
        .await;

        Ok(categories)
    }

    /// Searches books, authors and categories at once, `limit` results of each.
    pub async fn all(
        &self,
        query: &str,
        limit: u64,
        user_id: Option<i32>,
    ) -> Result<SearchAll, AppError> {
        let started = Instant::now();
        let query = normalize(query)?;

        let filter = BookFilter {
            text: Some(query.clone()),
            active_only: true,
            ..Default::default()
        };
        let (books, _) = BookRepository::new(self.db)
            .get_paginated(0, limit, &filter)
            .await?;
        let authors = AuthorRepository::new(self.db).search(&query, limit).await?;
        let categories = CategoryRepository::new(self.db)
            .search(&query, limit)
            .await?;

        let results = SearchAll {
            query,
            books,
            authors,
            categories,
        };

        self.record(
            results.query.clone(),
            SearchType::All,
            results.total(),
            user_id,
            None,
            started,
        )
        .await;

        Ok(results)
    }

    async fn record(
        &self,
        query: String,
        search_type: SearchType,
        results: u64,
        user_id: Option<i32>,
        filters: Option<serde_json::Value>,
        started: Instant,
    ) {
        LogService::new(self.db)
            .record_search(SearchLogParams {
                query,
                search_type: search_type.as_str().to_string(),
                results_count: results.min(i32::MAX as u64) as i32,
                user_id,
                filters,
                duration_ms: started.elapsed().as_millis() as i64,
            })
            .await;
    }
}

/// Trims the query and rejects it when nothing is left.
fn normalize(query: &str) -> Result<String, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::invalid_field("q", "must not be empty"));
    }

    Ok(query.to_string())
}
