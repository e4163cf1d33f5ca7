use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto, PaginationQuery},
        favorite::{FavoriteCountDto, FavoriteDto, FavoriteStatusDto},
    },
    server::{
        error::AppError,
        middleware::auth::CurrentUser,
        model::{log::ClientInfo, page::PageParams},
        service::favorite::FavoriteService,
        state::AppState,
    },
};

/// Tag for grouping favorite endpoints in OpenAPI documentation
pub static FAVORITE_TAG: &str = "favorites";

/// Get the caller's favorites, newest first, each with a book summary.
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    tag = FAVORITE_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of favorites", body = PaginatedDto<FavoriteDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_favorites(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = PageParams::resolve(query.page, query.per_page, &state.config);

    let favorites = FavoriteService::new(&state.db)
        .get_paginated(&user, params)
        .await?;

    Ok((StatusCode::OK, Json(favorites.into_dto(|f| f.into_dto()))))
}

/// Mark a book as favorite.
///
/// # Returns
/// - `201 Created` - Favorite added
/// - `404 Not Found` - Book not found
/// - `409 Conflict` - Already a favorite
#[utoipa::path(
    post,
    path = "/api/v1/favorites/{book_id}",
    tag = FAVORITE_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 201, description = "Favorite added", body = FavoriteDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 409, description = "Already a favorite", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let favorite = FavoriteService::new(&state.db)
        .add(&user, book_id, &client)
        .await?;

    Ok((StatusCode::CREATED, Json(favorite.into_dto())))
}

/// Remove a book from favorites.
///
/// # Returns
/// - `204 No Content` - Favorite removed
/// - `404 Not Found` - The book was not a favorite
#[utoipa::path(
    delete,
    path = "/api/v1/favorites/{book_id}",
    tag = FAVORITE_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Favorite removed"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Not a favorite", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    FavoriteService::new(&state.db)
        .remove(&user, book_id, &client)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/favorites/{book_id}/status",
    tag = FAVORITE_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Favorite status", body = FavoriteStatusDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_favorite_status(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let is_favorite = FavoriteService::new(&state.db)
        .is_favorite(&user, book_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(FavoriteStatusDto {
            book_id,
            is_favorite,
        }),
    ))
}

/// Flip the favorite state of a book and return the new state.
#[utoipa::path(
    post,
    path = "/api/v1/favorites/{book_id}/toggle",
    tag = FAVORITE_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "New favorite status", body = FavoriteStatusDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let is_favorite = FavoriteService::new(&state.db)
        .toggle(&user, book_id, &client)
        .await?;

    Ok((
        StatusCode::OK,
        Json(FavoriteStatusDto {
            book_id,
            is_favorite,
        }),
    ))
}

/// Count how many users favorited a book.
#[utoipa::path(
    get,
    path = "/api/v1/favorites/{book_id}/count",
    tag = FAVORITE_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Favorite count", body = FavoriteCountDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_favorite_count(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let count = FavoriteService::new(&state.db)
        .count_for_book(book_id)
        .await?;

    Ok((StatusCode::OK, Json(FavoriteCountDto { book_id, count })))
}
