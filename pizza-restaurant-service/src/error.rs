use axum::{http::StatusCode, response::IntoResponse};

use crate::json::PrettyJson;
use crate::serializer::{ErrorResponse, ErrorsResponse};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Restaurant not found")]
    RestaurantNotFound,
    #[error("validation errors")]
    ValidationFailed,
    #[error("Invalid pizza or restaurant ID")]
    InvalidReference,
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            ApiError::RestaurantNotFound => (
                StatusCode::NOT_FOUND,
                PrettyJson(ErrorResponse {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            ApiError::ValidationFailed | ApiError::InvalidReference => (
                StatusCode::BAD_REQUEST,
                PrettyJson(ErrorsResponse {
                    errors: vec![self.to_string()],
                }),
            )
                .into_response(),
            ApiError::Database(_) | ApiError::Pool(_) | ApiError::Join(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    PrettyJson(ErrorResponse {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_of(ApiError::RestaurantNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Restaurant not found" }));
    }

    #[tokio::test]
    async fn test_validation_bodies() {
        let (status, body) = body_of(ApiError::ValidationFailed).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "errors": ["validation errors"] }));

        let (status, body) = body_of(ApiError::InvalidReference).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({ "errors": ["Invalid pizza or restaurant ID"] })
        );
    }

    #[tokio::test]
    async fn test_storage_errors_are_not_leaked() {
        let (status, body) = body_of(ApiError::Database(diesel::result::Error::NotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }
}
