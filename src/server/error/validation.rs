use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// A single field-level validation failure reported in 422 responses.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    /// Field name as it appears in the request body, or `body` when the payload as a
    /// whole could not be read.
    pub field: String,
    /// Human readable description of the failure.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Flattens `validator` output into one `FieldError` per failed rule.
///
/// Fields are sorted by name so responses are stable across runs.
pub fn from_validation_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("failed '{}' check", e.code));
                FieldError::new(field.clone(), message)
            })
        })
        .collect();

    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}
