pub mod handlers;
pub mod responses;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Message returned to clients for every 5xx; the real cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error body returned by every endpoint.
///
/// ```json
/// { "error": "Product not found" }
/// ```
///
/// Validation failures additionally carry the per-field errors:
///
/// ```json
/// {
///   "error": "Request validation failed",
///   "details": { "price": [{ "code": "range", "message": null, "params": {} }] }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Optional structured details (field validation errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own error enums into this type so every
/// endpoint renders failures the same way.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query string error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Path parameter error: {0}")]
    PathExtractorRejection(#[from] PathRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::JsonExtractorRejection(JsonRejection::MissingJsonContentType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            AppError::JsonExtractorRejection(_)
            | AppError::QueryExtractorRejection(_)
            | AppError::PathExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::Database(e) => {
                tracing::error!(error = ?e, "Database error");
                ErrorResponse::new(INTERNAL_ERROR_MESSAGE)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                ErrorResponse::new(INTERNAL_ERROR_MESSAGE)
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::info!("JSON extraction error: {}", e.body_text());
                ErrorResponse::new(e.body_text())
            }
            AppError::QueryExtractorRejection(e) => {
                tracing::info!("Query string error: {}", e.body_text());
                ErrorResponse::new(e.body_text())
            }
            AppError::PathExtractorRejection(e) => {
                tracing::info!("Path parameter error: {}", e.body_text());
                ErrorResponse::new(e.body_text())
            }
            AppError::ValidationError(e) => {
                tracing::info!("Validation error: {}", e);
                ErrorResponse {
                    error: "Request validation failed".to_string(),
                    details: serde_json::to_value(&e).ok(),
                }
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                ErrorResponse::new(msg)
            }
            AppError::Unauthorized(msg) => {
                tracing::info!("Unauthorized: {}", msg);
                ErrorResponse::new(msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                ErrorResponse::new(msg)
            }
            AppError::Conflict(msg) => {
                tracing::info!("Conflict: {}", msg);
                ErrorResponse::new(msg)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                ErrorResponse::new(msg)
            }
        };

        (status, Json(body)).into_response()
    }
}
