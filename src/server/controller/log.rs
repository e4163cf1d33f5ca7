use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        log::{LogEntryDto, LogQuery},
    },
    server::{
        error::AppError,
        middleware::auth::AdminUser,
        model::{log::LogKind, page::PageParams},
        service::log::LogService,
        state::AppState,
    },
};

/// Tag for grouping admin log endpoints in OpenAPI documentation
pub static LOG_TAG: &str = "admin-logs";

/// Get a page of one log table, newest first.
///
/// `kind` is one of `authentication`, `api-requests`, `performance`, `user-activity`,
/// `admin-activity` or `search`. The `user_id` filter applies to the authentication,
/// user activity and search tables and is ignored for the others.
///
/// # Access Control
/// - `Admin` - Only admins can read logs
///
/// # Returns
/// - `200 OK` - Page of log entries
/// - `401 Unauthorized` - Not authenticated
/// - `403 Forbidden` - Not an admin
/// - `404 Not Found` - Unknown log kind
#[utoipa::path(
    get,
    path = "/api/v1/admin/logs/{kind}",
    tag = LOG_TAG,
    params(
        ("kind" = String, Path, description = "Log table"),
        LogQuery
    ),
    responses(
        (status = 200, description = "Page of log entries", body = PaginatedDto<LogEntryDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Unknown log kind", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_logs(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(kind): Path<String>,
    Query(query): Query<LogQuery>,
) -> Result<impl IntoResponse, AppError> {
    let kind = LogKind::parse(&kind)
        .ok_or_else(|| AppError::NotFound(format!("Unknown log kind '{}'", kind)))?;
    let params = PageParams::resolve(query.page, query.per_page, &state.config);

    let logs = LogService::new(&state.db)
        .list(kind, params, query.user_id)
        .await?;

    Ok((StatusCode::OK, Json(logs)))
}
