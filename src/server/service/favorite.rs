//! Favorite books.
//!
//! A favorite is a unique (user, book) pair; toggling flips between present and absent.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{book::BookRepository, favorite::FavoriteRepository},
    error::AppError,
    model::{
        favorite::Favorite,
        log::{ClientInfo, UserActivityLogParams},
        page::{Page, PageParams},
        user::User,
    },
    service::log::LogService,
};

pub struct FavoriteService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FavoriteService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the caller's favorites newest first, each with its book.
    pub async fn get_paginated(
        &self,
        user: &User,
        params: PageParams,
    ) -> Result<Page<Favorite>, AppError> {
        let (favorites, total) = FavoriteRepository::new(self.db)
            .get_by_user_paginated(user.id, params.page, params.per_page)
            .await?;

        Ok(Page::new(favorites, total, params))
    }

    /// Marks a book as favorite.
    ///
    /// # Returns
    /// - `Ok(Favorite)` - Newly created favorite
    /// - `Err(AppError::NotFound)` - Book does not exist
    /// - `Err(AppError::Conflict)` - Already a favorite
    pub async fn add(
        &self,
        user: &User,
        book_id: i32,
        client: &ClientInfo,
    ) -> Result<Favorite, AppError> {
        let repo = FavoriteRepository::new(self.db);

        if !BookRepository::new(self.db).exists(book_id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        if repo.find(user.id, book_id).await?.is_some() {
            return Err(AppError::Conflict("Book is already a favorite".to_string()));
        }

        let favorite = repo.create(user.id, book_id).await?;
        self.record(user, "FAVORITE_ADD", book_id, client).await;

        Ok(favorite)
    }

    /// Removes a book from favorites; 404 when it was not a favorite.
    pub async fn remove(&self, user: &User, book_id: i32, client: &ClientInfo) -> Result<(), AppError> {
        if !FavoriteRepository::new(self.db)
            .delete(user.id, book_id)
            .await?
        {
            return Err(AppError::NotFound("Favorite not found".to_string()));
        }

        self.record(user, "FAVORITE_REMOVE", book_id, client).await;

        Ok(())
    }

    pub async fn is_favorite(&self, user: &User, book_id: i32) -> Result<bool, AppError> {
        Ok(FavoriteRepository::new(self.db)
            .find(user.id, book_id)
            .await?
            .is_some())
    }

    /// Flips the favorite state of a book.
    ///
    /// # Returns
    /// - `Ok(true)` - The book is now a favorite
    /// - `Ok(false)` - The book is no longer a favorite
    pub async fn toggle(&self, user: &User, book_id: i32, client: &ClientInfo) -> Result<bool, AppError> {
        if self.is_favorite(user, book_id).await? {
            self.remove(user, book_id, client).await?;
            Ok(false)
        } else {
            self.add(user, book_id, client).await?;
            Ok(true)
        }
    }

    pub async fn count_for_book(&self, book_id: i32) -> Result<u64, AppError> {
        if !BookRepository::new(self.db).exists(book_id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        Ok(FavoriteRepository::new(self.db)
            .count_for_book(book_id)
            .await?)
    }

    async fn record(&self, user: &User, activity: &str, book_id: i32, client: &ClientInfo) {
        LogService::new(self.db)
            .record_user_activity(
                UserActivityLogParams::new(user.id, activity, client).resource("book", book_id),
            )
            .await;
    }
}
