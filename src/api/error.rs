//! API Error Types
//!
//! Errors of the HTTP layer and their JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::sheets::SheetError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Unknown report or sheet
    #[error("Not found: {0}")]
    NotFound(String),

    /// The sheet source failed
    #[error("Sheet source error: {0}")]
    Sheet(#[from] SheetError),

    /// A report context could not be turned into JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Sheet(SheetError::InvalidSheetName(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_SHEET_NAME")
            }
            ApiError::Sheet(SheetError::Auth(_)) => (StatusCode::BAD_GATEWAY, "SOURCE_AUTH_ERROR"),
            ApiError::Sheet(SheetError::WorkbookNotFound(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "WORKBOOK_NOT_FOUND")
            }
            ApiError::Sheet(_) => (StatusCode::BAD_GATEWAY, "SOURCE_ERROR"),
            ApiError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZATION_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
