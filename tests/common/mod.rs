// Shared test helpers

use homelab_api::config::AppConfig;
use homelab_api::docker_repo::DockerRepo;
use homelab_api::metrics_repo::MetricsRepo;
use homelab_api::routes;
use homelab_api::status::StatusAggregator;
use std::sync::Arc;

pub const API_KEY: &str = "test-secret";
pub const PROM_INSTANCE: &str = "host.docker.internal:9100";

/// Address nothing listens on; calls fail with a transport error.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

pub fn test_config(prometheus_url: &str) -> AppConfig {
    AppConfig {
        api_key: API_KEY.into(),
        prometheus_url: prometheus_url.into(),
        prom_instance: PROM_INSTANCE.into(),
        repo_root: "/tmp".into(),
        deploy_script: "/nonexistent/deploy.sh".into(),
        host: "127.0.0.1".into(),
        port: 8000,
    }
}

/// Build the full router against the given (usually mocked) backends.
pub fn test_app(config: AppConfig, docker_addr: &str) -> axum::Router {
    let docker = Arc::new(DockerRepo::connect_with_http(docker_addr).expect("docker client"));
    let metrics = MetricsRepo::new(&config.prometheus_url).expect("metrics client");
    let status = Arc::new(StatusAggregator::new(metrics, config.prom_instance.clone()));
    routes::app(docker, status, config)
}
