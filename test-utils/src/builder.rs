use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, then call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Author, Book, Category};
///
/// let test = TestBuilder::new()
///     .with_table(Author)
///     .with_table(Category)
///     .with_table(Book)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after their referenced tables).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the catalog tables: User, Author, Category, Book and Chapter.
    pub fn with_catalog_tables(self) -> Self {
        self.with_table(User)
            .with_table(Author)
            .with_table(Category)
            .with_table(Book)
            .with_table(Chapter)
    }

    /// Adds the catalog tables plus every per-reader table.
    ///
    /// Covers favorites, reviews, reading lists with their items, reading progress and
    /// reading sessions.
    pub fn with_reader_tables(self) -> Self {
        self.with_catalog_tables()
            .with_table(Favorite)
            .with_table(Review)
            .with_table(ReadingList)
            .with_table(ReadingListItem)
            .with_table(ReadingProgress)
            .with_table(ReadingSession)
    }

    /// Adds the six append-only log tables.
    pub fn with_log_tables(self) -> Self {
        self.with_table(AuthenticationLog)
            .with_table(ApiRequestLog)
            .with_table(PerformanceLog)
            .with_table(UserActivityLog)
            .with_table(AdminActivityLog)
            .with_table(SearchLog)
    }

    /// Adds every table in the schema.
    ///
    /// Used by router-level tests that exercise the full middleware stack.
    pub fn with_all_tables(self) -> Self {
        self.with_reader_tables().with_log_tables()
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
