//! Mapping from domain errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use moneta_core::ErrorClass;
use moneta_core::projection::ProjectionError;
use moneta_db::{RepositoryError, StoreError};
use moneta_shared::AppError;

/// Error returned by handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let message = err.to_string();
        let app = match (&err, err.class()) {
            (RepositoryError::Store(StoreError::NotFound { .. }), _) => AppError::NotFound(message),
            (RepositoryError::Store(StoreError::Conflict { .. }), _) => AppError::Conflict(message),
            (RepositoryError::Store(StoreError::Unavailable(_)), _) => AppError::Store(message),
            (_, ErrorClass::AtomicityViolation) => AppError::BusinessRule(message),
            (_, ErrorClass::Computation) => AppError::Internal(message),
            _ => AppError::Validation(message),
        };
        Self(app)
    }
}

impl From<ProjectionError> for ApiError {
    fn from(err: ProjectionError) -> Self {
        let message = err.to_string();
        match err.class() {
            ErrorClass::Computation => Self(AppError::Internal(message)),
            _ => Self(AppError::Validation(message)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

/// Handler result.
pub type ApiResult<T> = Result<T, ApiError>;
