//! Favorite factory for linking users to books in tests.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Marks a book as a favorite of the given user.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Owning user
/// - `book_id` - Favorited book
///
/// # Returns
/// - `Ok(entity::favorite::Model)` - Created favorite row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_favorite(
    db: &DatabaseConnection,
    user_id: i32,
    book_id: i32,
) -> Result<entity::favorite::Model, DbErr> {
    entity::favorite::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        book_id: ActiveValue::Set(book_id),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
