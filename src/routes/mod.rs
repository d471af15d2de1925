// HTTP routes and shared state

mod http;

use axum::routing::{get, post};
use axum::{Router, middleware};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::auth;
use crate::config::AppConfig;
use crate::docker_repo::DockerRepo;
use crate::status::StatusAggregator;

#[derive(Clone)]
pub struct AppState {
    pub(crate) docker: Arc<DockerRepo>,
    pub(crate) status: Arc<StatusAggregator>,
    pub(crate) config: AppConfig,
}

pub fn app(docker: Arc<DockerRepo>, status: Arc<StatusAggregator>, config: AppConfig) -> Router {
    let state = AppState {
        docker,
        status,
        config,
    };

    let protected = Router::new()
        .route("/services", get(http::list_services)) // GET /services
        .route("/status", get(http::node_status)) // GET /status
        .route("/restart/{service}", post(http::restart_service)) // POST /restart/{service}
        .route("/deploy", post(http::deploy)) // POST /deploy
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/", get(http::index)) // GET / (control panel, unauthenticated)
        .route("/health", get(http::health)) // GET /health
        .route("/version", get(http::version_handler)) // GET /version
        .merge(protected)
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
