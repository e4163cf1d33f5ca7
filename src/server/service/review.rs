use sea_orm::DatabaseConnection;

use crate::server::{
    data::{book::BookRepository, review::ReviewRepository},
    error::{auth::AuthError, AppError},
    model::{
        log::{ClientInfo, UserActivityLogParams},
        page::{Page, PageParams},
        review::{BookRating, CreateReviewParams, Review, UpdateReviewParams},
        user::User,
    },
    service::log::LogService,
};

pub struct ReviewService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the caller's review of a book.
    ///
    /// # Returns
    /// - `Ok(Review)` - Created review
    /// - `Err(AppError::NotFound)` - Book does not exist
    /// - `Err(AppError::Conflict)` - The caller already reviewed this book
    pub async fn create(
        &self,
        user: &User,
        params: CreateReviewParams,
        client: &ClientInfo,
    ) -> Result<Review, AppError> {
        let repo = ReviewRepository::new(self.db);

        if !BookRepository::new(self.db).exists(params.book_id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        if repo
            .find_by_user_and_book(user.id, params.book_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "You have already reviewed this book".to_string(),
            ));
        }

        let review = repo.create(params).await?;

        LogService::new(self.db)
            .record_user_activity(
                UserActivityLogParams::new(user.id, "REVIEW_CREATE", client)
                    .resource("review", review.id)
                    .metadata(serde_json::json!({
                        "book_id": review.book_id,
                        "rating": review.rating,
                    })),
            )
            .await;

        Ok(review)
    }

    pub async fn get_by_book(
        &self,
        book_id: i32,
        params: PageParams,
    ) -> Result<Page<Review>, AppError> {
        if !BookRepository::new(self.db).exists(book_id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        let (reviews, total) = ReviewRepository::new(self.db)
            .get_by_book_paginated(book_id, params.page, params.per_page)
            .await?;

        Ok(Page::new(reviews, total, params))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Review, AppError> {
        ReviewRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))
    }

    /// Average rating and review count for a book.
    pub async fn get_rating(&self, book_id: i32) -> Result<BookRating, AppError> {
        if !BookRepository::new(self.db).exists(book_id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        let ratings = ReviewRepository::new(self.db)
            .get_ratings_for_book(book_id)
            .await?;

        Ok(BookRating::from_ratings(book_id, &ratings))
    }

    /// Edits a review. Only its author may edit it.
    pub async fn update(
        &self,
        user: &User,
        id: i32,
        params: UpdateReviewParams,
        client: &ClientInfo,
    ) -> Result<Review, AppError> {
        let existing = self.get_by_id(id).await?;
        if existing.user_id != user.id {
            return Err(AuthError::AccessDenied(user.id, format!("update review {}", id)).into());
        }

        let review = ReviewRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

        LogService::new(self.db)
            .record_user_activity(
                UserActivityLogParams::new(user.id, "REVIEW_UPDATE", client)
                    .resource("review", id),
            )
            .await;

        Ok(review)
    }

    /// Deletes a review. Allowed for its author and for admins.
    pub async fn delete(&self, user: &User, id: i32, client: &ClientInfo) -> Result<(), AppError> {
        let existing = self.get_by_id(id).await?;
        if existing.user_id != user.id && !user.is_admin {
            return Err(AuthError::AccessDenied(user.id, format!("delete review {}", id)).into());
        }

        ReviewRepository::new(self.db).delete(id).await?;

        LogService::new(self.db)
            .record_user_activity(
                UserActivityLogParams::new(user.id, "REVIEW_DELETE", client)
                    .resource("review", id)
                    .metadata(serde_json::json!({ "book_id": existing.book_id })),
            )
            .await;

        Ok(())
    }
}
