use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto, PaginationQuery},
        author::{AuthorDto, CreateAuthorDto, UpdateAuthorDto},
    },
    server::{
        error::AppError,
        middleware::{auth::AdminUser, validate::ValidatedJson},
        model::{
            author::{CreateAuthorParams, UpdateAuthorParams},
            log::ClientInfo,
            page::PageParams,
        },
        service::author::AuthorService,
        state::AppState,
    },
};

/// Tag for grouping author endpoints in OpenAPI documentation
pub static AUTHOR_TAG: &str = "authors";

/// Get paginated authors, ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/authors",
    tag = AUTHOR_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of authors", body = PaginatedDto<AuthorDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_authors(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthorService::new(&state.db);

    let params = PageParams::resolve(query.page, query.per_page, &state.config);
    let authors = service.get_paginated(params).await?;

    Ok((StatusCode::OK, Json(authors.into_dto(|a| a.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/authors/{author_id}",
    tag = AUTHOR_TAG,
    params(("author_id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author found", body = AuthorDto),
        (status = 404, description = "Author not found", body = ErrorDto)
    ),
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let author = AuthorService::new(&state.db).get_by_id(author_id).await?;

    Ok((StatusCode::OK, Json(author.into_dto())))
}

/// Create a new author.
///
/// # Access Control
/// - `Admin` - Only admins can create authors
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `client` - Caller address recorded in the admin activity log
/// - `admin` - Authenticated admin
/// - `payload` - Author fields; empty optional strings are stored as null
///
/// # Returns
/// - `201 Created` - The created author
/// - `401 Unauthorized` - Not authenticated
/// - `403 Forbidden` - Not an admin
/// - `422 Unprocessable Entity` - Invalid author data
#[utoipa::path(
    post,
    path = "/api/v1/authors",
    tag = AUTHOR_TAG,
    request_body = CreateAuthorDto,
    responses(
        (status = 201, description = "Author created", body = AuthorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 422, description = "Invalid author data", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_author(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateAuthorDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthorService::new(&state.db);

    let author = service
        .create(&admin, CreateAuthorParams::from_dto(payload), &client)
        .await?;

    Ok((StatusCode::CREATED, Json(author.into_dto())))
}

/// Update an author.
///
/// # Access Control
/// - `Admin` - Only admins can update authors
#[utoipa::path(
    put,
    path = "/api/v1/authors/{author_id}",
    tag = AUTHOR_TAG,
    params(("author_id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthorDto,
    responses(
        (status = 200, description = "Author updated", body = AuthorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Author not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_author(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    Path(author_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateAuthorDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthorService::new(&state.db);

    let author = service
        .update(&admin, author_id, UpdateAuthorParams::from_dto(payload), &client)
        .await?;

    Ok((StatusCode::OK, Json(author.into_dto())))
}

/// Delete an author and their books.
///
/// # Access Control
/// - `Admin` - Only admins can delete authors
///
/// # Returns
/// - `204 No Content` - Author deleted
/// - `404 Not Found` - Author not found
#[utoipa::path(
    delete,
    path = "/api/v1/authors/{author_id}",
    tag = AUTHOR_TAG,
    params(("author_id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Author not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_author(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    Path(author_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthorService::new(&state.db)
        .delete(&admin, author_id, &client)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
