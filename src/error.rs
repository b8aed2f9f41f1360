use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum FacturesError {
    /// Missing or empty required input. Carries the endpoint's fixed message.
    #[error("{0}")]
    Validation(&'static str),

    /// Delete target does not exist.
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl IntoResponse for FacturesError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            FacturesError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.to_string()),
            FacturesError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            FacturesError::DatabaseError(_) | FacturesError::JsonError(_) => {
                error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };
        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

/// Error body shared by every endpoint: `{"error": "..."}`.
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: FacturesError) -> (StatusCode, String) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        (status, String::from_utf8(body.to_vec()).expect("body was not utf-8"))
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_message() {
        let (status, body) = render(FacturesError::Validation("Name is required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Name is required"}"#);
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_message() {
        let (status, body) = render(FacturesError::NotFound("Invoice not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"Invoice not found"}"#);
    }

    #[tokio::test]
    async fn database_error_is_hidden_behind_500() {
        let (status, body) = render(FacturesError::DatabaseError(SqlxError::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("RowNotFound"));
        assert!(body.contains(r#""error":"#));
    }
}
