use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto, PaginationQuery},
        review::{BookRatingDto, CreateReviewDto, ReviewDto, UpdateReviewDto},
    },
    server::{
        error::AppError,
        middleware::{auth::CurrentUser, validate::ValidatedJson},
        model::{
            log::ClientInfo,
            page::PageParams,
            review::{CreateReviewParams, UpdateReviewParams},
        },
        service::review::ReviewService,
        state::AppState,
    },
};

/// Tag for grouping review endpoints in OpenAPI documentation
pub static REVIEW_TAG: &str = "reviews";

/// Review a book.
///
/// Each user may review a book once.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `client` - Caller address recorded in the activity log
/// - `user` - Authenticated reviewer
/// - `book_id` - Book being reviewed
/// - `payload` - Rating from 1 to 5, content and optional title
///
/// # Returns
/// - `201 Created` - The new review
/// - `404 Not Found` - Book not found
/// - `409 Conflict` - The user already reviewed this book
/// - `422 Unprocessable Entity` - Rating out of range or empty content
#[utoipa::path(
    post,
    path = "/api/v1/books/{book_id}/reviews",
    tag = REVIEW_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = ReviewDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 409, description = "Book already reviewed", body = ErrorDto),
        (status = 422, description = "Invalid review", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_review(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<CreateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = ReviewService::new(&state.db);

    let params = CreateReviewParams::from_dto(user.id, book_id, payload);
    let review = service.create(&user, params, &client).await?;

    Ok((StatusCode::CREATED, Json(review.into_dto())))
}

/// Get paginated reviews of a book, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/books/{book_id}/reviews",
    tag = REVIEW_TAG,
    params(
        ("book_id" = i32, Path, description = "Book ID"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Page of reviews", body = PaginatedDto<ReviewDto>),
        (status = 404, description = "Book not found", body = ErrorDto)
    ),
)]
pub async fn get_book_reviews(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = PageParams::resolve(query.page, query.per_page, &state.config);

    let reviews = ReviewService::new(&state.db)
        .get_by_book(book_id, params)
        .await?;

    Ok((StatusCode::OK, Json(reviews.into_dto(|r| r.into_dto()))))
}

/// Get the average rating and review count of a book.
#[utoipa::path(
    get,
    path = "/api/v1/books/{book_id}/rating",
    tag = REVIEW_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Rating summary", body = BookRatingDto),
        (status = 404, description = "Book not found", body = ErrorDto)
    ),
)]
pub async fn get_book_rating(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let rating = ReviewService::new(&state.db).get_rating(book_id).await?;

    Ok((StatusCode::OK, Json(rating.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews/{review_id}",
    tag = REVIEW_TAG,
    params(("review_id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review found", body = ReviewDto),
        (status = 404, description = "Review not found", body = ErrorDto)
    ),
)]
pub async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let review = ReviewService::new(&state.db).get_by_id(review_id).await?;

    Ok((StatusCode::OK, Json(review.into_dto())))
}

/// Edit a review.
///
/// # Access Control
/// - Owner only
#[utoipa::path(
    put,
    path = "/api/v1/reviews/{review_id}",
    tag = REVIEW_TAG,
    params(("review_id" = i32, Path, description = "Review ID")),
    request_body = UpdateReviewDto,
    responses(
        (status = 200, description = "Review updated", body = ReviewDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the review author", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_review(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let review = ReviewService::new(&state.db)
        .update(&user, review_id, UpdateReviewParams::from_dto(payload), &client)
        .await?;

    Ok((StatusCode::OK, Json(review.into_dto())))
}

/// Delete a review.
///
/// # Access Control
/// - Owner, or any admin
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{review_id}",
    tag = REVIEW_TAG,
    params(("review_id" = i32, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Neither the author nor an admin", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_review(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ReviewService::new(&state.db)
        .delete(&user, review_id, &client)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
