use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No `Authorization: Bearer` header was sent with a protected request.
    #[error("Missing bearer token")]
    MissingToken,

    /// The bearer token failed signature, format or type validation.
    #[error("Invalid bearer token")]
    InvalidToken,

    /// The bearer token was well formed but its `exp` claim has passed.
    #[error("Bearer token has expired")]
    ExpiredToken,

    /// The token referenced a user id that no longer exists.
    #[error("User {0} referenced by token not found in database")]
    UserNotFound(i32),

    /// The user account exists but has been deactivated.
    #[error("User {0} is inactive")]
    InactiveUser(i32),

    /// Login attempt with an unknown identifier or a wrong password.
    ///
    /// Both cases share one client-facing error so callers cannot tell which accounts
    /// exist. The precise cause is recorded in the authentication log.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// The user is authenticated but lacks the required role.
    ///
    /// # Fields
    /// - User id that was denied
    /// - Description of the denied operation, logged server side
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(i32, String),
}

impl AuthError {
    /// Short machine-readable reason recorded in failure authentication logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::ExpiredToken => "token_expired",
            Self::UserNotFound(_) => "user_not_found",
            Self::InactiveUser(_) => "inactive_user",
            Self::InvalidCredentials => "invalid_credentials",
            Self::AccessDenied(_, _) => "insufficient_permissions",
        }
    }
}

/// Converts authentication errors into HTTP responses.
///
/// - `MissingToken` / `InvalidToken` / `ExpiredToken` / `UserNotFound` /
///   `InvalidCredentials` → 401 Unauthorized with a `WWW-Authenticate: Bearer` header
/// - `InactiveUser` / `AccessDenied` → 403 Forbidden
///
/// Client-facing messages stay generic; the detailed variant text is only logged.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "Not authenticated"),
            Self::InvalidToken | Self::UserNotFound(_) => {
                (StatusCode::UNAUTHORIZED, "Could not validate credentials")
            }
            Self::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
            Self::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Incorrect username or password")
            }
            Self::InactiveUser(_) => (StatusCode::FORBIDDEN, "Inactive user"),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "Not enough permissions"),
        };

        let body = Json(ErrorDto::new(message));

        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
