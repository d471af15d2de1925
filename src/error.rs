// API error taxonomy and HTTP mapping

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Request-level failures. Each variant maps to one HTTP status and a short
/// `{"detail": ...}` body; upstream error text is carried verbatim where present.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Unknown service '{0}'")]
    InvalidService(String),

    #[error("Service not found")]
    ServiceNotFound,

    #[error("Error talking to Prometheus: {0}")]
    MetricsUnreachable(String),

    #[error("Prometheus returned error: {0}")]
    MetricsQuery(String),

    #[error("Docker daemon is not running or not accessible")]
    RuntimeUnavailable,

    #[error("Error restarting service: {0}")]
    RuntimeOperation(String),

    #[error("Deploy script not found at {0}")]
    DeployScriptMissing(String),

    #[error("Failed to start deploy: {0}")]
    DeployLaunch(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidService(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ServiceNotFound => StatusCode::NOT_FOUND,
            ApiError::MetricsUnreachable(_) | ApiError::MetricsQuery(_) => StatusCode::BAD_GATEWAY,
            ApiError::RuntimeUnavailable
            | ApiError::RuntimeOperation(_)
            | ApiError::DeployScriptMissing(_)
            | ApiError::DeployLaunch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}
