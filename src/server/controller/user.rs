use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        user::{CreateUserDto, UpdateProfileDto, UpdateUserDto, UserDto, UserListQuery},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{AdminUser, CurrentUser},
            validate::ValidatedJson,
        },
        model::{log::ClientInfo, page::PageParams, user::UserFilter},
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "users";

/// Get the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Update the authenticated user's profile.
///
/// Only `full_name`, `bio` and `avatar_url` can be changed here. Email, username and
/// role changes go through the admin endpoints.
///
/// # Returns
/// - `200 OK` - Updated profile
/// - `401 Unauthorized` - Not authenticated
/// - `422 Unprocessable Entity` - Invalid profile data
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 422, description = "Invalid profile data", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_me(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = UserService::new(&state.db);

    let user = service.update_profile(&user, payload, &client).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Get paginated users.
///
/// # Access Control
/// - `Admin` - Only admins can list users
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `query` - Page, page size, free-text `search` and `is_active` filter
///
/// # Returns
/// - `200 OK` - Page of users
/// - `401 Unauthorized` - Not authenticated
/// - `403 Forbidden` - Not an admin
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = USER_TAG,
    params(UserListQuery),
    responses(
        (status = 200, description = "Page of users", body = PaginatedDto<UserDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = UserService::new(&state.db);

    let params = PageParams::resolve(query.page, query.per_page, &state.config);
    let filter = UserFilter {
        search: query.search,
        is_active: query.is_active,
    };

    let users = service.get_paginated(params, &filter).await?;

    Ok((StatusCode::OK, Json(users.into_dto(|u| u.into_dto()))))
}

/// Get a user by id.
///
/// # Access Control
/// - `Admin` - Only admins can view other accounts
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_user(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = UserService::new(&state.db);

    let user = service.get_by_id(user_id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Create a user account.
///
/// Unlike self registration, an admin may set `is_admin` and `is_active` directly.
///
/// # Access Control
/// - `Admin` - Only admins can create accounts here
///
/// # Returns
/// - `201 Created` - The new user
/// - `409 Conflict` - Email or username already taken
/// - `422 Unprocessable Entity` - Invalid user data
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 409, description = "Email or username already taken", body = ErrorDto),
        (status = 422, description = "Invalid user data", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_user(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = UserService::new(&state.db);

    let user = service.create(&admin, payload, &client).await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Update a user account.
///
/// # Access Control
/// - `Admin` - Only admins can edit other accounts
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 409, description = "Email or username already taken", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_user(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = UserService::new(&state.db);

    let user = service.update(&admin, user_id, payload, &client).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Delete a user account.
///
/// # Access Control
/// - `Admin` - Only admins can delete accounts; deleting your own account is rejected
///
/// # Returns
/// - `204 No Content` - User deleted
/// - `400 Bad Request` - Attempt to delete the calling admin
/// - `404 Not Found` - User not found
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Cannot delete own account", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = UserService::new(&state.db);

    service.delete(&admin, user_id, &client).await?;

    Ok(StatusCode::NO_CONTENT)
}
