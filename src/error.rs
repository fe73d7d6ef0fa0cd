use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

/// Errors surfaced by the HTTP handlers.
///
/// Every variant renders as `{"error": ...}`. Nothing here is retried; the
/// browser has to repeat the action.
#[derive(Error, Debug)]
pub enum AppError {
    /// A credential the endpoint needs is absent from the configuration.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("Not authenticated with Pinterest")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    /// Upstream failure, carrying the provider's body or the transport
    /// error message.
    #[error("Upstream error: {0}")]
    Upstream(Value),

    #[error("Failed to fetch image")]
    ImageFetch,

    #[error("Failed to analyze image")]
    Analysis,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotConfigured(_)
            | AppError::Upstream(_)
            | AppError::ImageFetch
            | AppError::Analysis => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Upstream(detail) => json!({ "error": detail }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
