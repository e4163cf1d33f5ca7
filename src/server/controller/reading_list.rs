use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        reading_list::{
            AddReadingListBookDto, CreateReadingListDto, ReadingListDto, ReadingListItemDto,
            ReorderReadingListDto, UpdateReadingListDto,
        },
    },
    server::{
        error::AppError,
        middleware::{auth::CurrentUser, validate::ValidatedJson},
        model::{
            log::ClientInfo,
            reading_list::{CreateReadingListParams, UpdateReadingListParams},
        },
        service::reading_list::ReadingListService,
        state::AppState,
    },
};

/// Tag for grouping reading list endpoints in OpenAPI documentation
pub static READING_LIST_TAG: &str = "reading-lists";

#[utoipa::path(
    post,
    path = "/api/v1/reading-lists",
    tag = READING_LIST_TAG,
    request_body = CreateReadingListDto,
    responses(
        (status = 201, description = "Reading list created", body = ReadingListDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 422, description = "Invalid reading list", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_reading_list(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateReadingListDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = CreateReadingListParams::from_dto(user.id, payload);

    let list = ReadingListService::new(&state.db)
        .create(&user, params, &client)
        .await?;

    Ok((StatusCode::CREATED, Json(list.into_dto())))
}

/// Get every reading list owned by the caller, with items in order.
#[utoipa::path(
    get,
    path = "/api/v1/reading-lists",
    tag = READING_LIST_TAG,
    responses(
        (status = 200, description = "Caller's reading lists", body = Vec<ReadingListDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_my_reading_lists(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let lists = ReadingListService::new(&state.db).get_mine(&user).await?;

    let lists: Vec<ReadingListDto> = lists.into_iter().map(|l| l.into_dto()).collect();

    Ok((StatusCode::OK, Json(lists)))
}

/// Get a reading list.
///
/// # Access Control
/// - Owner, or any authenticated user when the list is public. Private lists of other
///   users answer 404.
#[utoipa::path(
    get,
    path = "/api/v1/reading-lists/{list_id}",
    tag = READING_LIST_TAG,
    params(("list_id" = i32, Path, description = "Reading list ID")),
    responses(
        (status = 200, description = "Reading list found", body = ReadingListDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Reading list not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_reading_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(list_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let list = ReadingListService::new(&state.db).get(&user, list_id).await?;

    Ok((StatusCode::OK, Json(list.into_dto())))
}

/// Update name, description or visibility of a list the caller owns.
#[utoipa::path(
    put,
    path = "/api/v1/reading-lists/{list_id}",
    tag = READING_LIST_TAG,
    params(("list_id" = i32, Path, description = "Reading list ID")),
    request_body = UpdateReadingListDto,
    responses(
        (status = 200, description = "Reading list updated", body = ReadingListDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Reading list not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_reading_list(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    Path(list_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateReadingListDto>,
) -> Result<impl IntoResponse, AppError> {
    let list = ReadingListService::new(&state.db)
        .update(
            &user,
            list_id,
            UpdateReadingListParams::from_dto(payload),
            &client,
        )
        .await?;

    Ok((StatusCode::OK, Json(list.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reading-lists/{list_id}",
    tag = READING_LIST_TAG,
    params(("list_id" = i32, Path, description = "Reading list ID")),
    responses(
        (status = 204, description = "Reading list deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Reading list not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_reading_list(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    Path(list_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ReadingListService::new(&state.db)
        .delete(&user, list_id, &client)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Append a book to a list.
///
/// The book is placed after the current last item.
///
/// # Returns
/// - `201 Created` - The new list item
/// - `403 Forbidden` - Not the owner
/// - `404 Not Found` - List or book not found
/// - `409 Conflict` - The book is already in the list
#[utoipa::path(
    post,
    path = "/api/v1/reading-lists/{list_id}/books",
    tag = READING_LIST_TAG,
    params(("list_id" = i32, Path, description = "Reading list ID")),
    request_body = AddReadingListBookDto,
    responses(
        (status = 201, description = "Book added", body = ReadingListItemDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "List or book not found", body = ErrorDto),
        (status = 409, description = "Book already in list", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn add_reading_list_book(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    Path(list_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<AddReadingListBookDto>,
) -> Result<impl IntoResponse, AppError> {
    let item = ReadingListService::new(&state.db)
        .add_book(&user, list_id, payload.book_id, payload.notes, &client)
        .await?;

    Ok((StatusCode::CREATED, Json(item.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reading-lists/{list_id}/books/{book_id}",
    tag = READING_LIST_TAG,
    params(
        ("list_id" = i32, Path, description = "Reading list ID"),
        ("book_id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book removed"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "List not found or book not in list", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn remove_reading_list_book(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    Path((list_id, book_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    ReadingListService::new(&state.db)
        .remove_book(&user, list_id, book_id, &client)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Reorder a list.
///
/// The body lists book ids from first to last. Every id must already be in the list
/// and appear at most once.
///
/// # Returns
/// - `200 OK` - The list in its new order
/// - `400 Bad Request` - Unknown or repeated book id
/// - `403 Forbidden` - Not the owner
#[utoipa::path(
    put,
    path = "/api/v1/reading-lists/{list_id}/reorder",
    tag = READING_LIST_TAG,
    params(("list_id" = i32, Path, description = "Reading list ID")),
    request_body = ReorderReadingListDto,
    responses(
        (status = 200, description = "List reordered", body = ReadingListDto),
        (status = 400, description = "Unknown or repeated book id", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Reading list not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn reorder_reading_list(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    Path(list_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<ReorderReadingListDto>,
) -> Result<impl IntoResponse, AppError> {
    let list = ReadingListService::new(&state.db)
        .reorder(&user, list_id, payload.book_ids, &client)
        .await?;

    Ok((StatusCode::OK, Json(list.into_dto())))
}
