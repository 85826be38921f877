use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("CSV export failed: {0}")]
    Export(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(database::DbError::NotFound) => (
                StatusCode::NOT_FOUND,
                "The requested resource was not found".to_string(),
            ),
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            AppError::Export(message) => {
                tracing::error!(error = %message, "CSV export error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to export trades".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
