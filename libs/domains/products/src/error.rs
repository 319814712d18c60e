use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i32),

    #[error("Product with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses.
///
/// The duplicate-name case carries an operation-specific message on the
/// wire, so the create/update handlers intercept it before this conversion
/// runs; the message here is only a fallback.
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::DuplicateName(name) => {
                AppError::BadRequest(format!("Product with name '{}' already exists", name))
            }
            ProductError::Validation(msg) => AppError::UnprocessableEntity(msg),
            ProductError::Database(msg) => {
                // The underlying cause is logged, never surfaced to the caller
                tracing::error!(error = %msg, "persistence failure");
                AppError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
