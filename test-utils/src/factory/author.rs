//! Author factory for creating test author entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test authors with customizable fields.
pub struct AuthorFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    nationality: Option<String>,
}

impl<'a> AuthorFactory<'a> {
    /// Creates a new AuthorFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Author {id}"`
    /// - nationality: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Author {}", next_id()),
            nationality: None,
        }
    }

    /// Sets the author name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the author nationality.
    pub fn nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = Some(nationality.into());
        self
    }

    /// Builds and inserts the author entity into the database.
    pub async fn build(self) -> Result<entity::author::Model, DbErr> {
        let now = Utc::now();
        entity::author::ActiveModel {
            name: ActiveValue::Set(self.name),
            bio: ActiveValue::Set(None),
            birth_date: ActiveValue::Set(None),
            death_date: ActiveValue::Set(None),
            nationality: ActiveValue::Set(self.nationality),
            website: ActiveValue::Set(None),
            image_url: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an author with default values.
pub async fn create_author(db: &DatabaseConnection) -> Result<entity::author::Model, DbErr> {
    AuthorFactory::new(db).build().await
}
