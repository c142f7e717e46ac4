use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;

/// Message shown to users whenever a collaborator fails.
///
/// The detailed cause is logged, never returned to the client.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong, please try again later";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("History store not available: {0}")]
    NotAvailable(String),

    #[error("Catalog API rate limit exceeded")]
    RateLimited,

    #[error("External call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status used when this error reaches a handler boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotAvailable(_) | AppError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Network(_) | AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Cache(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Caller mistakes are safe to echo back; everything else is logged
        // and collapsed into one generic notice.
        let message = match &self {
            AppError::InvalidInput(msg) => msg.clone(),
            _ => {
                tracing::error!(error = %self, status = %status, "Request failed");
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotAvailable("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::Timeout(Duration::from_secs(10)).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            AppError::ExternalApi("boom".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    async fn error_body(err: AppError) -> serde_json::Value {
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_failures_share_one_neutral_message() {
        for err in [
            AppError::NotAvailable("connection refused".into()),
            AppError::ExternalApi("TMDB returned 500".into()),
            AppError::Timeout(Duration::from_secs(10)),
        ] {
            let body = error_body(err).await;
            assert_eq!(body["error"], GENERIC_FAILURE_MESSAGE);
        }
        assert!(!GENERIC_FAILURE_MESSAGE.contains("recommendation"));
    }

    #[tokio::test]
    async fn test_invalid_input_is_echoed() {
        let body = error_body(AppError::InvalidInput("Invalid year: soon".into())).await;
        assert_eq!(body["error"], "Invalid year: soon");
    }

    #[test]
    fn test_timeout_display_includes_deadline() {
        assert_eq!(
            AppError::Timeout(Duration::from_secs(10)).to_string(),
            "External call timed out after 10s"
        );
    }
}
