use chrono::{DateTime, Utc};

use crate::{model::favorite::FavoriteDto, server::model::book::Book};

/// A user's favorite with the book summary attached when listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub created_at: DateTime<Utc>,
    pub book: Option<Book>,
}

impl Favorite {
    pub fn into_dto(self) -> FavoriteDto {
        FavoriteDto {
            id: self.id,
            book_id: self.book_id,
            created_at: self.created_at,
            book: self.book.map(Book::into_dto),
        }
    }

    pub fn from_entity(entity: entity::favorite::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            book_id: entity.book_id,
            created_at: entity.created_at,
            book: None,
        }
    }
}
