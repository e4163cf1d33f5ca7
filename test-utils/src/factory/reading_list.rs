//! Reading list factory for creating test reading lists and items.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test reading lists with customizable fields.
pub struct ReadingListFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    name: String,
    is_public: bool,
}

impl<'a> ReadingListFactory<'a> {
    /// Creates a new private ReadingListFactory owned by `user_id`.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            name: format!("List {}", next_id()),
            is_public: false,
        }
    }

    /// Sets the list name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets whether other users may view the list.
    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Builds and inserts the reading list entity into the database.
    pub async fn build(self) -> Result<entity::reading_list::Model, DbErr> {
        let now = Utc::now();
        entity::reading_list::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            is_public: ActiveValue::Set(self.is_public),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a private reading list with default values.
pub async fn create_reading_list(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::reading_list::Model, DbErr> {
    ReadingListFactory::new(db, user_id).build().await
}

/// Appends a book to a reading list at the given position.
pub async fn add_reading_list_item(
    db: &DatabaseConnection,
    reading_list_id: i32,
    book_id: i32,
    order_index: i32,
) -> Result<entity::reading_list_item::Model, DbErr> {
    entity::reading_list_item::ActiveModel {
        reading_list_id: ActiveValue::Set(reading_list_id),
        book_id: ActiveValue::Set(book_id),
        order_index: ActiveValue::Set(order_index),
        notes: ActiveValue::Set(None),
        added_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
