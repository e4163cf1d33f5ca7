//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for automatic error handling in API endpoints.

pub mod auth;
pub mod config;
pub mod storage;
pub mod validation;

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::SqlErr;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, storage::StorageError, validation::FieldError,
    },
};

/// Whether 500 responses include the underlying error text.
///
/// Set once at startup from the `DEBUG` setting.
static EXPOSE_ERROR_DETAIL: AtomicBool = AtomicBool::new(false);

/// Enables or disables error detail in 500 responses.
pub fn set_expose_error_detail(enabled: bool) {
    EXPOSE_ERROR_DETAIL.store(enabled, Ordering::Relaxed);
}

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Most variants use `#[from]` for automatic
/// error conversion. Domain-specific errors like `AuthError` handle their own response
/// mapping, while generic variants provide standard HTTP status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` for 401/403 mapping.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Object storage error.
    ///
    /// Delegates to `StorageError::into_response()`.
    #[error(transparent)]
    StorageErr(#[from] StorageError),

    /// Database operation error from SeaORM.
    ///
    /// Unique constraint violations become 409 Conflict and missing records 404;
    /// everything else is a 500 with details logged server-side.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    ///
    /// Results in 500 Internal Server Error when object storage calls fail.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Token signing error.
    ///
    /// Decoding failures are mapped to `AuthError` before reaching this variant, so
    /// only encoding problems end up here as 500s.
    #[error(transparent)]
    JwtErr(#[from] jsonwebtoken::errors::Error),

    /// Request body failed shape or rule validation.
    ///
    /// Results in 422 Unprocessable Entity with one entry per offending field.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// Request conflicts with existing state, such as a duplicate unique value.
    ///
    /// Results in 409 Conflict with the provided error message.
    #[error("{0}")]
    Conflict(String),

    /// Internal server error with custom message.
    ///
    /// Results in 500 Internal Server Error. The provided message is logged
    /// but a generic message is returned to the client outside debug mode.
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// Builds a single-field validation error.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest` variant
/// - 404 Not Found - For `NotFound` and `DbErr::RecordNotFound`
/// - 409 Conflict - For `Conflict` and unique constraint violations
/// - 422 Unprocessable Entity - For `Validation`
/// - 500 Internal Server Error - For all other error types
/// - Variable - For `AuthErr` and `StorageErr`, delegated to their own mappings
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::StorageErr(err) => err.into_response(),
            Self::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorDto::new("Validation error").with_errors(errors)),
            )
                .into_response(),
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto::new(msg))).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto::new(msg))).into_response()
            }
            Self::Conflict(msg) => {
                (StatusCode::CONFLICT, Json(ErrorDto::new(msg))).into_response()
            }
            Self::DbErr(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    tracing::debug!("Unique constraint violation: {}", detail);
                    (
                        StatusCode::CONFLICT,
                        Json(ErrorDto::new("Resource already exists")),
                    )
                        .into_response()
                }
                _ => match err {
                    sea_orm::DbErr::RecordNotFound(msg) => {
                        (StatusCode::NOT_FOUND, Json(ErrorDto::new(msg))).into_response()
                    }
                    err => InternalServerError(err).into_response(),
                },
            },
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client. In debug mode the error text is attached as `detail`.
pub struct InternalServerError<E>(pub E);

/// Converts wrapped errors into 500 Internal Server Error responses.
///
/// # Arguments
/// - `E` - Any type that implements `Display` (typically an error type)
///
/// # Returns
/// A 500 Internal Server Error response with a generic error message JSON body
impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        let mut body = ErrorDto::new("Internal server error");
        if EXPOSE_ERROR_DETAIL.load(Ordering::Relaxed) {
            body.detail = Some(self.0.to_string());
        }

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
