use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i32),

    /// The product does not exist or belongs to another seller; callers
    /// cannot tell which.
    #[error("Product not found or unauthorized")]
    NotFoundOrUnauthorized,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Category not found: {0}")]
    UnknownCategory(i32),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::NotFoundOrUnauthorized => {
                AppError::NotFound("Product not found or unauthorized".to_string())
            }
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::UnknownCategory(id) => {
                AppError::BadRequest(format!("Category {} does not exist", id))
            }
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ProductError::NotFound(1), StatusCode::NOT_FOUND),
            (ProductError::NotFoundOrUnauthorized, StatusCode::NOT_FOUND),
            (
                ProductError::Validation("name is blank".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (ProductError::UnknownCategory(99), StatusCode::BAD_REQUEST),
            (
                ProductError::Database(DbErr::Custom("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(AppError::from(error).status(), status);
        }
    }
}
