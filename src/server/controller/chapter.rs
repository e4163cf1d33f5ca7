use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        chapter::{ChapterDto, CreateChapterDto, UpdateChapterDto},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{AdminUser, OptionalUser},
            validate::ValidatedJson,
        },
        model::{
            chapter::{CreateChapterParams, UpdateChapterParams},
            log::ClientInfo,
        },
        service::chapter::ChapterService,
        state::AppState,
    },
};

/// Tag for grouping chapter endpoints in OpenAPI documentation
pub static CHAPTER_TAG: &str = "chapters";

/// List the chapters of a book in chapter order.
///
/// The public sees published, active chapters only; admins see every chapter.
///
/// # Returns
/// - `200 OK` - Chapters of the book
/// - `404 Not Found` - Book not found
#[utoipa::path(
    get,
    path = "/api/v1/books/{book_id}/chapters",
    tag = CHAPTER_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Chapters of the book", body = Vec<ChapterDto>),
        (status = 404, description = "Book not found", body = ErrorDto)
    ),
)]
pub async fn get_book_chapters(
    State(state): State<AppState>,
    viewer: OptionalUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let chapters = ChapterService::new(&state.db)
        .get_by_book(book_id, viewer.is_admin())
        .await?;

    let chapters: Vec<ChapterDto> = chapters.into_iter().map(|c| c.into_dto()).collect();

    Ok((StatusCode::OK, Json(chapters)))
}

#[utoipa::path(
    get,
    path = "/api/v1/chapters/{chapter_id}",
    tag = CHAPTER_TAG,
    params(("chapter_id" = i32, Path, description = "Chapter ID")),
    responses(
        (status = 200, description = "Chapter found", body = ChapterDto),
        (status = 404, description = "Chapter not found", body = ErrorDto)
    ),
)]
pub async fn get_chapter(
    State(state): State<AppState>,
    viewer: OptionalUser,
    Path(chapter_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let chapter = ChapterService::new(&state.db)
        .get_by_id(chapter_id, viewer.is_admin())
        .await?;

    Ok((StatusCode::OK, Json(chapter.into_dto())))
}

/// Add a chapter to a book.
///
/// # Access Control
/// - `Admin` - Only admins can create chapters
///
/// # Returns
/// - `201 Created` - The created chapter
/// - `404 Not Found` - Book not found
/// - `409 Conflict` - The book already has a chapter with this number
#[utoipa::path(
    post,
    path = "/api/v1/books/{book_id}/chapters",
    tag = CHAPTER_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    request_body = CreateChapterDto,
    responses(
        (status = 201, description = "Chapter created", body = ChapterDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 409, description = "Chapter number already used", body = ErrorDto),
        (status = 422, description = "Invalid chapter data", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_chapter(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    Path(book_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<CreateChapterDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = ChapterService::new(&state.db);

    let chapter = service
        .create(
            &admin,
            CreateChapterParams::from_dto(book_id, payload),
            &client,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(chapter.into_dto())))
}

/// Update a chapter.
///
/// # Access Control
/// - `Admin` - Only admins can update chapters
#[utoipa::path(
    put,
    path = "/api/v1/chapters/{chapter_id}",
    tag = CHAPTER_TAG,
    params(("chapter_id" = i32, Path, description = "Chapter ID")),
    request_body = UpdateChapterDto,
    responses(
        (status = 200, description = "Chapter updated", body = ChapterDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Chapter not found", body = ErrorDto),
        (status = 409, description = "Chapter number already used", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_chapter(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    Path(chapter_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateChapterDto>,
) -> Result<impl IntoResponse, AppError> {
    let chapter = ChapterService::new(&state.db)
        .update(
            &admin,
            chapter_id,
            UpdateChapterParams::from_dto(payload),
            &client,
        )
        .await?;

    Ok((StatusCode::OK, Json(chapter.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/chapters/{chapter_id}",
    tag = CHAPTER_TAG,
    params(("chapter_id" = i32, Path, description = "Chapter ID")),
    responses(
        (status = 204, description = "Chapter deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Chapter not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_chapter(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    Path(chapter_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ChapterService::new(&state.db)
        .delete(&admin, chapter_id, &client)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
