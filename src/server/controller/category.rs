use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto, PaginationQuery},
        category::{CategoryDto, CreateCategoryDto, UpdateCategoryDto},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{AdminUser, OptionalUser},
            validate::ValidatedJson,
        },
        model::{
            category::{CreateCategoryParams, UpdateCategoryParams},
            log::ClientInfo,
            page::PageParams,
        },
        service::category::CategoryService,
        state::AppState,
    },
};

/// Tag for grouping category endpoints in OpenAPI documentation
pub static CATEGORY_TAG: &str = "categories";

/// Get paginated categories.
///
/// Anonymous callers and regular users see active categories only. An admin bearer
/// token also lists inactive ones.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `viewer` - Optional authenticated caller
/// - `query` - Page and page size
///
/// # Returns
/// - `200 OK` - Page of categories
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = CATEGORY_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of categories", body = PaginatedDto<CategoryDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_categories(
    State(state): State<AppState>,
    viewer: OptionalUser,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = CategoryService::new(&state.db);

    let params = PageParams::resolve(query.page, query.per_page, &state.config);
    let categories = service.get_paginated(params, viewer.is_admin()).await?;

    Ok((StatusCode::OK, Json(categories.into_dto(|c| c.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{category_id}",
    tag = CATEGORY_TAG,
    params(("category_id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = CategoryDto),
        (status = 404, description = "Category not found", body = ErrorDto)
    ),
)]
pub async fn get_category(
    State(state): State<AppState>,
    viewer: OptionalUser,
    Path(category_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let category = CategoryService::new(&state.db)
        .get_by_id(category_id, viewer.is_admin())
        .await?;

    Ok((StatusCode::OK, Json(category.into_dto())))
}

/// Get a category by its URL slug.
#[utoipa::path(
    get,
    path = "/api/v1/categories/slug/{slug}",
    tag = CATEGORY_TAG,
    params(("slug" = String, Path, description = "Category slug")),
    responses(
        (status = 200, description = "Category found", body = CategoryDto),
        (status = 404, description = "Category not found", body = ErrorDto)
    ),
)]
pub async fn get_category_by_slug(
    State(state): State<AppState>,
    viewer: OptionalUser,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let category = CategoryService::new(&state.db)
        .get_by_slug(&slug, viewer.is_admin())
        .await?;

    Ok((StatusCode::OK, Json(category.into_dto())))
}

/// Create a new category.
///
/// The slug is derived from the name.
///
/// # Access Control
/// - `Admin` - Only admins can create categories
///
/// # Returns
/// - `201 Created` - The created category
/// - `409 Conflict` - Another category already uses the derived slug
/// - `422 Unprocessable Entity` - Invalid category data
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = CATEGORY_TAG,
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = CategoryDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 409, description = "Slug already in use", body = ErrorDto),
        (status = 422, description = "Invalid category data", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_category(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = CategoryService::new(&state.db);

    let category = service
        .create(&admin, CreateCategoryParams::from_dto(payload), &client)
        .await?;

    Ok((StatusCode::CREATED, Json(category.into_dto())))
}

/// Update a category.
///
/// Renaming re-derives the slug.
///
/// # Access Control
/// - `Admin` - Only admins can update categories
#[utoipa::path(
    put,
    path = "/api/v1/categories/{category_id}",
    tag = CATEGORY_TAG,
    params(("category_id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = CategoryDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 409, description = "Slug already in use", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_category(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    Path(category_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = CategoryService::new(&state.db);

    let category = service
        .update(
            &admin,
            category_id,
            UpdateCategoryParams::from_dto(payload),
            &client,
        )
        .await?;

    Ok((StatusCode::OK, Json(category.into_dto())))
}

/// Delete a category.
///
/// # Access Control
/// - `Admin` - Only admins can delete categories
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{category_id}",
    tag = CATEGORY_TAG,
    params(("category_id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_category(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    Path(category_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    CategoryService::new(&state.db)
        .delete(&admin, category_id, &client)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
