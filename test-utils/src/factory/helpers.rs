//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
///
/// Every factory draws from this counter so unique columns (emails, usernames,
/// category names) never collide within a test binary.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a book together with the author and category it references.
///
/// All entities are created with default values. Use the individual factories if
/// you need to customize specific entities.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((author, category, book))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_book_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::author::Model,
        entity::category::Model,
        entity::book::Model,
    ),
    DbErr,
> {
    let author = crate::factory::author::create_author(db).await?;
    let category = crate::factory::category::create_category(db).await?;
    let book = crate::factory::book::create_book(db, author.id, category.id).await?;

    Ok((author, category, book))
}
