use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{debug, error};

use crate::api_models::{ApiErrorResponse, ApiErrorsResponse};
use crate::models::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Restaurant not found")]
    RestaurantNotFound,
    #[error("Missing required fields")]
    MissingFields,
    #[error("Pizza or Restaurant not found")]
    ReferenceNotFound,
    #[error("validation errors")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    InvalidBody(String),
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::InternalError(format!("Storage task failed: {e}"))
    }
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(ApiErrorResponse { error: message })).into_response()
}

fn errors_body(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(ApiErrorsResponse {
            errors: vec![message],
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::RestaurantNotFound => error_body(StatusCode::NOT_FOUND, self.to_string()),
            ApiError::MissingFields | ApiError::InvalidBody(_) => {
                errors_body(StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::ReferenceNotFound => errors_body(StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Validation(e) => {
                debug!(reason = %e, "rejected restaurant pizza");
                errors_body(StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Database(_) | ApiError::Pool(_) | ApiError::InternalError(_) => {
                error!(error = %self, "request failed");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::RestaurantNotFound, StatusCode::NOT_FOUND),
            (ApiError::MissingFields, StatusCode::BAD_REQUEST),
            (ApiError::ReferenceNotFound, StatusCode::NOT_FOUND),
            (
                ApiError::Validation(ValidationError::PriceOutOfRange(31)),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::InvalidBody(
                    "Expected request with `Content-Type: application/json`".into(),
                ),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Database(diesel::result::Error::NotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_validation_message_hides_detail() {
        let err = ApiError::from(ValidationError::PriceOutOfRange(0));
        assert_eq!(err.to_string(), "validation errors");
    }
}
