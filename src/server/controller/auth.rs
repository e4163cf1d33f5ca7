use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{
            ChangePasswordDto, ForgotPasswordDto, LoginDto, RefreshTokenDto, RegisterDto,
            ResetPasswordDto, TokenDto,
        },
        user::UserDto,
    },
    server::{
        error::AppError,
        middleware::{auth::CurrentUser, validate::ValidatedJson},
        model::log::ClientInfo,
        service::auth::{AccessToken, AuthService},
        state::AppState,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Create a new account.
///
/// Registers an active, non-admin user and sends a welcome email when SMTP is
/// configured. The email is best-effort and never fails the request.
///
/// # Arguments
/// - `state` - Application state containing the database connection and email service
/// - `client` - Caller address and user agent for the authentication log
/// - `payload` - Email, username, password and optional full name
///
/// # Returns
/// - `201 Created` - The new user
/// - `409 Conflict` - Email or username already taken
/// - `422 Unprocessable Entity` - Invalid registration data
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 409, description = "Email or username already registered", body = ErrorDto),
        (status = 422, description = "Invalid registration data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    client: ClientInfo,
    ValidatedJson(payload): ValidatedJson<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.config, &state.email);

    let user = service.register(payload, &client).await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Exchange credentials for a bearer token.
///
/// `username` may hold either the username or the email address. Every attempt writes
/// exactly one authentication log entry.
///
/// # Returns
/// - `200 OK` - Access token with its lifetime and the user
/// - `401 Unauthorized` - Unknown user or wrong password
/// - `403 Forbidden` - Account deactivated
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login succeeded", body = TokenDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 403, description = "Account inactive", body = ErrorDto),
        (status = 422, description = "Missing credentials", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    client: ClientInfo,
    ValidatedJson(payload): ValidatedJson<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.config, &state.email);

    let token = service.login(payload, &client).await?;

    Ok((StatusCode::OK, Json(token_dto(token))))
}

/// Exchange a refresh token for a new token pair.
///
/// Every call writes one `token_refresh` authentication log entry.
///
/// # Returns
/// - `200 OK` - New access and refresh tokens with the user
/// - `401 Unauthorized` - Refresh token invalid, expired or for a deleted account
/// - `403 Forbidden` - Account deactivated
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh-token",
    tag = AUTH_TAG,
    request_body = RefreshTokenDto,
    responses(
        (status = 200, description = "Tokens refreshed", body = TokenDto),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorDto),
        (status = 403, description = "Account inactive", body = ErrorDto),
        (status = 422, description = "Missing refresh token", body = ErrorDto)
    ),
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    client: ClientInfo,
    ValidatedJson(payload): ValidatedJson<RefreshTokenDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.config, &state.email);

    let token = service.refresh(&payload.refresh_token, &client).await?;

    Ok((StatusCode::OK, Json(token_dto(token))))
}

/// Get the authenticated user.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Request a password reset email.
///
/// Always answers with the same message so callers cannot tell which addresses are
/// registered.
#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    tag = AUTH_TAG,
    request_body = ForgotPasswordDto,
    responses(
        (status = 200, description = "Request accepted", body = MessageDto),
        (status = 422, description = "Invalid email", body = ErrorDto)
    ),
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    client: ClientInfo,
    ValidatedJson(payload): ValidatedJson<ForgotPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.config, &state.email);

    service.forgot_password(&payload.email, &client).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new(
            "If the address is registered, a reset link has been sent",
        )),
    ))
}

/// Set a new password using a reset token.
///
/// # Returns
/// - `200 OK` - Password changed
/// - `400 Bad Request` - Token invalid, expired or of the wrong type
#[utoipa::path(
    post,
    path = "/api/v1/auth/reset-password",
    tag = AUTH_TAG,
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password reset", body = MessageDto),
        (status = 400, description = "Invalid or expired reset token", body = ErrorDto),
        (status = 422, description = "Invalid request", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    client: ClientInfo,
    ValidatedJson(payload): ValidatedJson<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.config, &state.email);

    service.reset_password(payload, &client).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Password has been reset"))))
}

/// Change the password of the authenticated user.
///
/// # Returns
/// - `200 OK` - Password changed
/// - `400 Bad Request` - Current password does not match
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    post,
    path = "/api/v1/auth/change-password",
    tag = AUTH_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 400, description = "Current password incorrect", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn change_password(
    State(state): State<AppState>,
    client: ClientInfo,
    CurrentUser(user): CurrentUser,
    ValidatedJson(payload): ValidatedJson<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.config, &state.email);

    service.change_password(&user, payload, &client).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Password has been changed"))))
}

fn token_dto(token: AccessToken) -> TokenDto {
    TokenDto {
        access_token: token.token,
        refresh_token: token.refresh_token,
        token_type: "bearer".to_string(),
        expires_in: token.expires_in,
        user: token.user.into_dto(),
    }
}
