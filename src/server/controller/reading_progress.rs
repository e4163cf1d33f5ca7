use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto, PaginationQuery},
        reading_progress::{
            CreateReadingProgressDto, ProgressListQuery, ReadingProgressDto, ReadingStatsDto,
            UpdateReadingProgressDto,
        },
    },
    server::{
        error::AppError,
        middleware::{auth::CurrentUser, validate::ValidatedJson},
        model::{
            log::ClientInfo,
            page::PageParams,
            reading_progress::{ProgressUpdate, ReadingStatus},
        },
        service::reading_progress::ReadingProgressService,
        state::AppState,
    },
};

/// Tag for grouping reading progress endpoints in OpenAPI documentation
pub static READING_PROGRESS_TAG: &str = "reading-progress";

/// Get the caller's progress records, most recently updated first.
#[utoipa::path(
    get,
    path = "/api/v1/reading-progress",
    tag = READING_PROGRESS_TAG,
    params(ProgressListQuery),
    responses(
        (status = 200, description = "Page of progress records", body = PaginatedDto<ReadingProgressDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_my_progress(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ProgressListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = PageParams::resolve(query.page, query.per_page, &state.config);
    let status = query.status.map(ReadingStatus::from_dto);

    let progress = ReadingProgressService::new(&state.db)
        .get_paginated(&user, status, params)
        .await?;

    Ok((StatusCode::OK, Json(progress.into_dto(|p| p.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/reading-progress/completed",
    tag = READING_PROGRESS_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Completed books", body = PaginatedDto<ReadingProgressDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_completed(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = PageParams::resolve(query.page, query.per_page, &state.config);

    let progress = ReadingProgressService::new(&state.db)
        .get_paginated(&user, Some(ReadingStatus::Completed), params)
        .await?;

    Ok((StatusCode::OK, Json(progress.into_dto(|p| p.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/reading-progress/currently-reading",
    tag = READING_PROGRESS_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Books being read", body = PaginatedDto<ReadingProgressDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_currently_reading(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = PageParams::resolve(query.page, query.per_page, &state.config);

    let progress = ReadingProgressService::new(&state.db)
        .get_paginated(&user, Some(ReadingStatus::Reading), params)
        .await?;

    Ok((StatusCode::OK, Json(progress.into_dto(|p| p.into_dto()))))
}

/// Get reading totals for the caller.
#[utoipa::path(
    get,
    path = "/api/v1/reading-progress/stats",
    tag = READING_PROGRESS_TAG,
    responses(
        (status = 200, description = "Reading statistics", body = ReadingStatsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_stats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let stats = ReadingProgressService::new(&state.db)
        .get_stats(&user)
        .await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}

/// Start tracking a book, or update the existing record for it.
///
/// When `total_pages` is omitted the book's page count is used.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `client` - Caller address recorded in the activity log
/// - `user` - Authenticated reader
/// - `payload` - Book id with optional current page, total pages and notes
///
/// # Returns
/// - `200 OK` - The created or updated progress record
/// - `404 Not Found` - Book not found
#[utoipa::path(
    post,
    path = "/api/v1/reading-progress",
    tag = READING_PROGRESS_TAG,
    request_body = CreateReadingProgressDto,
    responses(
        (status = 200, description = "Progress recorded", body = ReadingProgressDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 422, description = "Invalid progress data", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn upsert_progress(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateReadingProgressDto>,
) -> Result<impl IntoResponse, AppError> {
    let book_id = payload.book_id;

    let progress = ReadingProgressService::new(&state.db)
        .upsert(
            &user,
            book_id,
            ProgressUpdate::from_create_dto(payload),
            &client,
        )
        .await?;

    Ok((StatusCode::OK, Json(progress.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/v1/reading-progress/{book_id}",
    tag = READING_PROGRESS_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Progress record", body = ReadingProgressDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "No progress for this book", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_progress(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let progress = ReadingProgressService::new(&state.db)
        .get(&user, book_id)
        .await?;

    Ok((StatusCode::OK, Json(progress.into_dto())))
}

/// Update progress on a book.
///
/// Reaching the last page marks the book completed; any page past zero marks it as
/// being read.
#[utoipa::path(
    put,
    path = "/api/v1/reading-progress/{book_id}",
    tag = READING_PROGRESS_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    request_body = UpdateReadingProgressDto,
    responses(
        (status = 200, description = "Progress updated", body = ReadingProgressDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "No progress for this book", body = ErrorDto),
        (status = 422, description = "Invalid progress data", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_progress(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateReadingProgressDto>,
) -> Result<impl IntoResponse, AppError> {
    let progress = ReadingProgressService::new(&state.db)
        .update(&user, book_id, ProgressUpdate::from_dto(payload), &client)
        .await?;

    Ok((StatusCode::OK, Json(progress.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reading-progress/{book_id}",
    tag = READING_PROGRESS_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Progress deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "No progress for this book", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_progress(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ReadingProgressService::new(&state.db)
        .delete(&user, book_id, &client)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
