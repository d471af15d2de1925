// Shared-secret gate for protected routes

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;

use crate::error::ApiError;
use crate::routes::AppState;

const API_KEY_HEADER: &str = "x-api-key";

/// Runs before every protected handler; a missing or wrong key short-circuits
/// to 401 so no handler ever reaches Docker or Prometheus unauthorized.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match presented {
        Some(key) if verify(key, &state.config.api_key) => Ok(next.run(request).await),
        _ => Err(ApiError::Unauthorized),
    }
}

/// Constant-time comparison; a plain `==` would leak how long a prefix of the
/// guess matched.
pub fn verify(presented: &str, secret: &str) -> bool {
    presented.as_bytes().ct_eq(secret.as_bytes()).into()
}
