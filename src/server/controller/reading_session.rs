use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto, PaginationQuery},
        reading_session::{EndSessionDto, ReadingSessionDto, StartSessionDto},
    },
    server::{
        error::AppError,
        middleware::{auth::CurrentUser, validate::ValidatedJson},
        model::{log::ClientInfo, page::PageParams, reading_session::StartSessionParams},
        service::reading_session::ReadingSessionService,
        state::AppState,
    },
};

/// Tag for grouping reading session endpoints in OpenAPI documentation
pub static READING_SESSION_TAG: &str = "reading-sessions";

/// Start a reading session.
///
/// Any session the caller still has open is ended first, so a user has at most one
/// active session.
///
/// # Returns
/// - `201 Created` - The new active session
/// - `404 Not Found` - Book or chapter not found
#[utoipa::path(
    post,
    path = "/api/v1/reading-sessions/start",
    tag = READING_SESSION_TAG,
    request_body = StartSessionDto,
    responses(
        (status = 201, description = "Session started", body = ReadingSessionDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Book or chapter not found", body = ErrorDto),
        (status = 422, description = "Invalid session data", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn start_session(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    ValidatedJson(payload): ValidatedJson<StartSessionDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = StartSessionParams {
        user_id: user.id,
        book_id: payload.book_id,
        chapter_id: payload.chapter_id,
        start_page: payload.start_page,
    };

    let session = ReadingSessionService::new(&state.db)
        .start(&user, params, &client)
        .await?;

    Ok((StatusCode::CREATED, Json(session.into_dto())))
}

/// End a reading session.
///
/// The session's minutes are added to the reader's progress on the book when a progress
/// record exists.
///
/// # Returns
/// - `200 OK` - The closed session
/// - `400 Bad Request` - Session already ended
/// - `404 Not Found` - Session not found or owned by another user
#[utoipa::path(
    put,
    path = "/api/v1/reading-sessions/{session_id}/end",
    tag = READING_SESSION_TAG,
    params(("session_id" = i32, Path, description = "Session ID")),
    request_body = EndSessionDto,
    responses(
        (status = 200, description = "Session ended", body = ReadingSessionDto),
        (status = 400, description = "Session already ended", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn end_session(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    Path(session_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<EndSessionDto>,
) -> Result<impl IntoResponse, AppError> {
    let session = ReadingSessionService::new(&state.db)
        .end(&user, session_id, payload.end_page, payload.notes, &client)
        .await?;

    Ok((StatusCode::OK, Json(session.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/v1/reading-sessions",
    tag = READING_SESSION_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Caller's sessions", body = PaginatedDto<ReadingSessionDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_my_sessions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = PageParams::resolve(query.page, query.per_page, &state.config);

    let sessions = ReadingSessionService::new(&state.db)
        .get_mine(&user, params)
        .await?;

    Ok((StatusCode::OK, Json(sessions.into_dto(|s| s.into_dto()))))
}
