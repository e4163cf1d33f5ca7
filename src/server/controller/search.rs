use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        author::AuthorDto,
        book::BookDto,
        category::CategoryDto,
        search::{SearchAllDto, SearchQuery},
    },
    server::{
        error::AppError,
        middleware::auth::OptionalUser,
        model::{book::BookFilter, page::PageParams},
        service::search::SearchService,
        state::AppState,
    },
};

/// Tag for grouping search endpoints in OpenAPI documentation
pub static SEARCH_TAG: &str = "search";

/// Search active books by title or description.
///
/// A valid bearer token is optional; when present the search log records the caller.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `viewer` - Optional authenticated caller
/// - `query` - Search text `q`, page and the book filters
///
/// # Returns
/// - `200 OK` - Page of matching books
/// - `422 Unprocessable Entity` - `q` missing or blank
#[utoipa::path(
    get,
    path = "/api/v1/search/books",
    tag = SEARCH_TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching books", body = PaginatedDto<BookDto>),
        (status = 422, description = "Empty search query", body = ErrorDto)
    ),
)]
pub async fn search_books(
    State(state): State<AppState>,
    viewer: OptionalUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = PageParams::resolve(query.page, query.per_page, &state.config);
    let filter = BookFilter {
        category_id: query.category_id,
        author_id: query.author_id,
        is_free: query.is_free,
        ..Default::default()
    };

    let books = SearchService::new(&state.db)
        .books(&query.q, filter, params, viewer.user_id())
        .await?;

    Ok((StatusCode::OK, Json(books.into_dto(|b| b.into_dto()))))
}

/// Search authors by name.
#[utoipa::path(
    get,
    path = "/api/v1/search/authors",
    tag = SEARCH_TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching authors", body = Vec<AuthorDto>),
        (status = 422, description = "Empty search query", body = ErrorDto)
    ),
)]
pub async fn search_authors(
    State(state): State<AppState>,
    viewer: OptionalUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = state.config.page_size(query.per_page);

    let authors = SearchService::new(&state.db)
        .authors(&query.q, limit, viewer.user_id())
        .await?;

    let authors: Vec<AuthorDto> = authors.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(authors)))
}

/// Search active categories by name or description.
#[utoipa::path(
    get,
    path = "/api/v1/search/categories",
    tag = SEARCH_TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching categories", body = Vec<CategoryDto>),
        (status = 422, description = "Empty search query", body = ErrorDto)
    ),
)]
pub async fn search_categories(
    State(state): State<AppState>,
    viewer: OptionalUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = state.config.page_size(query.per_page);

    let categories = SearchService::new(&state.db)
        .categories(&query.q, limit, viewer.user_id())
        .await?;

    let categories: Vec<CategoryDto> = categories.into_iter().map(|c| c.into_dto()).collect();

    Ok((StatusCode::OK, Json(categories)))
}

/// Search books, authors and categories at once.
///
/// Each group holds at most one page of results.
#[utoipa::path(
    get,
    path = "/api/v1/search",
    tag = SEARCH_TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Matches across all resources", body = SearchAllDto),
        (status = 422, description = "Empty search query", body = ErrorDto)
    ),
)]
pub async fn search_all(
    State(state): State<AppState>,
    viewer: OptionalUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = state.config.page_size(query.per_page);

    let results = SearchService::new(&state.db)
        .all(&query.q, limit, viewer.user_id())
        .await?;

    Ok((StatusCode::OK, Json(results.into_dto())))
}
