//! JSON body extraction with validation.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::server::error::{
    validation::{from_validation_errors, FieldError},
    AppError,
};

/// A JSON body that deserialized and passed its `validator` rules.
///
/// Unreadable bodies, missing fields, wrong types and failed rules are all rejected with
/// 422 before the handler runs.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;

        value
            .validate()
            .map_err(|errors| AppError::Validation(from_validation_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    AppError::Validation(vec![FieldError::new("body", rejection.body_text())])
}
