use chrono::{DateTime, Utc};

use crate::{
    model::review::{BookRatingDto, CreateReviewDto, ReviewDto, UpdateReviewDto},
    server::util::text::{non_empty, patch_text},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub rating: i32,
    pub title: Option<String>,
    pub content: String,
    pub contains_spoilers: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn into_dto(self) -> ReviewDto {
        ReviewDto {
            id: self.id,
            user_id: self.user_id,
            book_id: self.book_id,
            rating: self.rating,
            title: self.title,
            content: self.content,
            contains_spoilers: self.contains_spoilers,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn from_entity(entity: entity::review::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            book_id: entity.book_id,
            rating: entity.rating,
            title: entity.title,
            content: entity.content,
            contains_spoilers: entity.contains_spoilers,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateReviewParams {
    pub user_id: i32,
    pub book_id: i32,
    pub rating: i32,
    pub title: Option<String>,
    pub content: String,
    pub contains_spoilers: bool,
}

impl CreateReviewParams {
    pub fn from_dto(user_id: i32, book_id: i32, dto: CreateReviewDto) -> Self {
        Self {
            user_id,
            book_id,
            rating: dto.rating,
            title: non_empty(dto.title),
            content: dto.content,
            contains_spoilers: dto.contains_spoilers.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReviewParams {
    pub rating: Option<i32>,
    pub title: Option<Option<String>>,
    pub content: Option<String>,
    pub contains_spoilers: Option<bool>,
}

impl UpdateReviewParams {
    pub fn from_dto(dto: UpdateReviewDto) -> Self {
        Self {
            rating: dto.rating,
            title: patch_text(dto.title),
            content: dto.content,
            contains_spoilers: dto.contains_spoilers,
        }
    }
}

/// Aggregate rating for a book.
#[derive(Debug, Clone, PartialEq)]
pub struct BookRating {
    pub book_id: i32,
    /// Mean of all ratings rounded to 2 decimals; `None` without reviews.
    pub average_rating: Option<f64>,
    pub review_count: u64,
}

impl BookRating {
    /// Aggregates raw ratings for a book.
    pub fn from_ratings(book_id: i32, ratings: &[i32]) -> Self {
        let review_count = ratings.len() as u64;
        let average_rating = if ratings.is_empty() {
            None
        } else {
            let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
            let mean = sum as f64 / ratings.len() as f64;
            Some((mean * 100.0).round() / 100.0)
        };

        Self {
            book_id,
            average_rating,
            review_count,
        }
    }

    pub fn into_dto(self) -> BookRatingDto {
        BookRatingDto {
            book_id: self.book_id,
            average_rating: self.average_rating,
            review_count: self.review_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_ratings_to_two_decimals() {
        let rating = BookRating::from_ratings(1, &[5, 4, 4]);
        assert_eq!(rating.review_count, 3);
        assert_eq!(rating.average_rating, Some(4.33));

        let empty = BookRating::from_ratings(1, &[]);
        assert_eq!(empty.review_count, 0);
        assert_eq!(empty.average_rating, None);
    }
}
