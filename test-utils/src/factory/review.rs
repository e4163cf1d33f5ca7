//! Review factory for creating test review entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a review with the given rating.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Reviewing user
/// - `book_id` - Reviewed book
/// - `rating` - Star rating, 1 through 5
///
/// # Returns
/// - `Ok(entity::review::Model)` - Created review
/// - `Err(DbErr)` - Database error during insert
pub async fn create_review(
    db: &DatabaseConnection,
    user_id: i32,
    book_id: i32,
    rating: i32,
) -> Result<entity::review::Model, DbErr> {
    let now = Utc::now();
    entity::review::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        book_id: ActiveValue::Set(book_id),
        rating: ActiveValue::Set(rating),
        title: ActiveValue::Set(None),
        content: ActiveValue::Set(format!("A {} star read.", rating)),
        contains_spoilers: ActiveValue::Set(false),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}
