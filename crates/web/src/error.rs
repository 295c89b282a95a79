use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use storage::dto::common::{ErrorResponse, MissingFields};
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    MissingFields(MissingFields),
    BadRequest(String),
    NotFound(String),
}

impl WebError {
    pub fn entry_not_found() -> Self {
        Self::NotFound("History entry not found".to_string())
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::MissingFields(missing) => write!(f, "Bad request: {}", missing),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

fn validation_details(errors: &ValidationErrors) -> String {
    let mut field_errors: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                format!(
                    "{}: {}",
                    field,
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                )
            })
        })
        .collect();
    field_errors.sort();
    field_errors.join("; ")
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status_code, body) = match &self {
            Self::Storage(StorageError::NotFound) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("Resource not found"),
            ),
            Self::Storage(e) if e.is_client_error() => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(e.to_string()))
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("An internal error occurred").with_error(e.to_string()),
                )
            }
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Validation failed").with_error(validation_details(errors)),
            ),
            Self::MissingFields(missing) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(missing.to_string()))
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg.clone())),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg.clone())),
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<MissingFields> for WebError {
    fn from(missing: MissingFields) -> Self {
        Self::MissingFields(missing)
    }
}

pub type WebResult<T> = Result<T, WebError>;
