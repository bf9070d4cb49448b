pub mod favorites;
pub mod mortgage;
pub mod properties;
pub mod routes;
pub mod users;

pub use routes::{create_router, AppState};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Errors shared by the resource handlers.
#[derive(Debug)]
pub enum ApiError {
    Database(anyhow::Error),
    NotFound(String),
    BadRequest(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Database(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let err = anyhow::anyhow!("Test error");
        let api_err: ApiError = err.into();

        match api_err {
            ApiError::Database(_) => (),
            _ => panic!("Expected Database error"),
        }
    }

    #[test]
    fn test_error_statuses() {
        let not_found = ApiError::NotFound("missing".to_string()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let bad = ApiError::BadRequest("nope".to_string()).into_response();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }
}
