use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        book::{BookDto, BookListQuery, CreateBookDto, UpdateBookDto},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{AdminUser, OptionalUser},
            validate::ValidatedJson,
        },
        model::{
            book::{BookFilter, CreateBookParams, UpdateBookParams},
            log::ClientInfo,
            page::PageParams,
        },
        service::book::BookService,
        state::AppState,
    },
};

/// Tag for grouping book endpoints in OpenAPI documentation
pub static BOOK_TAG: &str = "books";

/// Get paginated books, newest first.
///
/// Filters by `category_id`, `author_id` and `is_free`. Only active books are listed
/// unless the caller presents an admin bearer token.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `viewer` - Optional authenticated caller
/// - `query` - Page, page size and filters
///
/// # Returns
/// - `200 OK` - Page of books with author and category names
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/v1/books",
    tag = BOOK_TAG,
    params(BookListQuery),
    responses(
        (status = 200, description = "Page of books", body = PaginatedDto<BookDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_books(
    State(state): State<AppState>,
    viewer: OptionalUser,
    Query(query): Query<BookListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = BookService::new(&state.db);

    let params = PageParams::resolve(query.page, query.per_page, &state.config);
    let filter = BookFilter {
        category_id: query.category_id,
        author_id: query.author_id,
        is_free: query.is_free,
        active_only: !viewer.is_admin(),
        text: None,
    };

    let books = service.get_paginated(params, &filter).await?;

    Ok((StatusCode::OK, Json(books.into_dto(|b| b.into_dto()))))
}

/// Get a book by id with author and category names.
#[utoipa::path(
    get,
    path = "/api/v1/books/{book_id}",
    tag = BOOK_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book found", body = BookDto),
        (status = 404, description = "Book not found", body = ErrorDto)
    ),
)]
pub async fn get_book(
    State(state): State<AppState>,
    viewer: OptionalUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let book = BookService::new(&state.db)
        .get_by_id(book_id, viewer.is_admin())
        .await?;

    Ok((StatusCode::OK, Json(book.into_dto())))
}

/// Create a new book.
///
/// # Access Control
/// - `Admin` - Only admins can create books
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `client` - Caller address recorded in the admin activity log
/// - `admin` - Authenticated admin
/// - `payload` - Book fields; `title`, `author_id` and `category_id` are required
///
/// # Returns
/// - `201 Created` - The created book
/// - `401 Unauthorized` - Not authenticated
/// - `403 Forbidden` - Not an admin
/// - `404 Not Found` - Referenced author or category does not exist
/// - `409 Conflict` - ISBN already used by another book
/// - `422 Unprocessable Entity` - Missing or invalid fields
#[utoipa::path(
    post,
    path = "/api/v1/books",
    tag = BOOK_TAG,
    request_body = CreateBookDto,
    responses(
        (status = 201, description = "Book created", body = BookDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Author or category not found", body = ErrorDto),
        (status = 409, description = "ISBN already exists", body = ErrorDto),
        (status = 422, description = "Invalid book data", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_book(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateBookDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = BookService::new(&state.db);

    let book = service
        .create(&admin, CreateBookParams::from_dto(payload), &client)
        .await?;

    Ok((StatusCode::CREATED, Json(book.into_dto())))
}

/// Update a book.
///
/// # Access Control
/// - `Admin` - Only admins can update books
///
/// # Returns
/// - `200 OK` - Updated book
/// - `404 Not Found` - Book, author or category not found
/// - `409 Conflict` - ISBN already used by another book
#[utoipa::path(
    put,
    path = "/api/v1/books/{book_id}",
    tag = BOOK_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    request_body = UpdateBookDto,
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Book, author or category not found", body = ErrorDto),
        (status = 409, description = "ISBN already exists", body = ErrorDto),
        (status = 422, description = "Invalid book data", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_book(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    Path(book_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateBookDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = BookService::new(&state.db);

    let book = service
        .update(&admin, book_id, UpdateBookParams::from_dto(payload), &client)
        .await?;

    Ok((StatusCode::OK, Json(book.into_dto())))
}

/// Delete a book along with its chapters, reviews and reader data.
///
/// # Access Control
/// - `Admin` - Only admins can delete books
#[utoipa::path(
    delete,
    path = "/api/v1/books/{book_id}",
    tag = BOOK_TAG,
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_book(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    BookService::new(&state.db)
        .delete(&admin, book_id, &client)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
