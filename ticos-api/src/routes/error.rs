use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::search::{ErrorDetails, ErrorResponse, SearchError};

const INVALID_REQUEST: &str = "INVALID_REQUEST";
const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
const SEARCH_ERROR: &str = "SEARCH_ERROR";

impl SearchError {
    fn status(&self) -> StatusCode {
        match self {
            Self::RequestParse(_) | Self::Validation(_) | Self::Conversion { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Execution { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Cancelled { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Client errors echo what was wrong; backend faults stay opaque.
    fn to_error_details(&self) -> ErrorDetails {
        let (code, message, details) = match self {
            Self::RequestParse(reason) => (
                INVALID_REQUEST,
                "Invalid request parameters".to_string(),
                vec![reason.clone()],
            ),
            Self::Validation(errors) => (
                VALIDATION_ERROR,
                "Invalid search parameters".to_string(),
                errors.clone(),
            ),
            Self::Conversion { field, .. } => (
                VALIDATION_ERROR,
                "Invalid search parameters".to_string(),
                vec![format!("invalid value for field: '{field}'")],
            ),
            Self::Execution { operation, .. } => (
                SEARCH_ERROR,
                format!("Failed to {operation}"),
                vec!["an internal error occurred while processing the search".to_string()],
            ),
            Self::Cancelled { operation } => (
                SEARCH_ERROR,
                format!("Failed to {operation}"),
                vec!["the search was cancelled".to_string()],
            ),
            Self::Timeout(_) => (
                SEARCH_ERROR,
                "Failed to complete search".to_string(),
                vec!["the search took too long to complete".to_string()],
            ),
        };

        ErrorDetails {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_error_details(),
        };
        (self.status(), Json(body)).into_response()
    }
}
