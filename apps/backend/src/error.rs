//! Error handling for the editor API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cardsheet_core::CardError;
use serde::Serialize;
use thiserror::Error;

use crate::services::catalog::CatalogError;
use crate::services::library::LibraryError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Structural error: {0}")]
    Structural(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::Parse(_) => (StatusCode::BAD_REQUEST, "parse_error"),
            ApiError::Structural(_) => (StatusCode::BAD_REQUEST, "structural_error"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Fetch(_) => (StatusCode::BAD_GATEWAY, "fetch_error"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<CardError> for ApiError {
    fn from(e: CardError) -> Self {
        match e {
            CardError::Parse { .. } => ApiError::Parse(e.to_string()),
            CardError::Structural(message) => ApiError::Structural(message),
            CardError::Validation(message) => ApiError::Validation(message),
            CardError::UnknownCard(id) => ApiError::NotFound(format!("card {id}")),
            CardError::FieldNotInSchema { .. }
            | CardError::InvalidColor(_)
            | CardError::InvalidPageCapacity => ApiError::BadRequest(e.to_string()),
            CardError::Serialize(message) => ApiError::Internal(message),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        ApiError::Fetch(e.to_string())
    }
}

impl From<LibraryError> for ApiError {
    fn from(e: LibraryError) -> Self {
        match e {
            LibraryError::UnknownClass(_) => ApiError::BadRequest(e.to_string()),
            LibraryError::Read { .. } => ApiError::Fetch(e.to_string()),
        }
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
