//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use lifeline_core::ServiceError;

/// Wrapper turning a [`ServiceError`] into an HTTP response with a
/// `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError(ServiceError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ServiceError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "authentication required".to_string())
            }
            ServiceError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ServiceError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServiceError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            ServiceError::Internal(detail) => {
                // Internal detail stays in the logs
                tracing::error!(%detail, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
