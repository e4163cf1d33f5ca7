use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::error::InternalServerError};

#[derive(Error, Debug)]
pub enum StorageError {
    /// Object storage credentials are absent from the environment.
    #[error("Object storage is not configured")]
    NotConfigured,

    /// The uploaded file's content type is not accepted for this upload kind.
    #[error("Unsupported file type '{0}'")]
    UnsupportedFileType(String),

    /// The uploaded file exceeds the size limit for this upload kind.
    #[error("File exceeds the {limit_mb} MB limit")]
    FileTooLarge {
        /// Maximum accepted size in megabytes
        limit_mb: usize,
    },

    /// A URL passed for deletion does not point into the configured bucket.
    #[error("'{0}' is not a public URL of the storage bucket")]
    InvalidUrl(String),

    /// The storage service answered with a non-success status.
    #[error("Storage service returned {status}: {body}")]
    Upstream {
        /// HTTP status returned by the storage service
        status: u16,
        /// Response body, kept for server-side logs
        body: String,
    },
}

/// Converts storage errors into HTTP responses.
///
/// Client mistakes (file type, size, foreign URL) map to 400 Bad Request. Missing
/// configuration and upstream failures are server errors.
impl IntoResponse for StorageError {
    fn into_response(self) -> Response {
        match self {
            Self::UnsupportedFileType(_) | Self::FileTooLarge { .. } | Self::InvalidUrl(_) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto::new(self.to_string()))).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}
