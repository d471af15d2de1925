// Container listing and restarts via bollard

use crate::error::ApiError;
use crate::models::{ContainerInfo, RestartResult, ServiceName};
use bollard::Docker;
use bollard::errors::Error as DockerError;
use bollard::query_parameters::{
    InspectContainerOptions, ListContainersOptions, RestartContainerOptions,
};
use bollard::models::{ContainerInspectResponse, ContainerSummary};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{info, warn};

// Restarts can legitimately take a while; everything else is quick.
const DOCKER_TIMEOUT_SECS: u64 = 30;

pub struct DockerRepo {
    docker: Docker,
}

impl DockerRepo {
    pub fn connect() -> anyhow::Result<Self> {
        let docker = Docker::connect_with_unix(
            "unix:///var/run/docker.sock",
            DOCKER_TIMEOUT_SECS,
            bollard::API_DEFAULT_VERSION,
        )?;
        Ok(Self { docker })
    }

    /// Connect to a daemon over TCP, e.g. a remote host or a mock in tests.
    pub fn connect_with_http(addr: &str) -> anyhow::Result<Self> {
        let docker =
            Docker::connect_with_http(addr, DOCKER_TIMEOUT_SECS, bollard::API_DEFAULT_VERSION)?;
        Ok(Self { docker })
    }

    /// List running containers with normalized metadata. A container that dies
    /// between list and inspect is skipped, not an error.
    pub async fn list_running(&self) -> Result<Vec<ContainerInfo>, ApiError> {
        let mut filters = HashMap::new();
        filters.insert("status".to_string(), vec!["running".to_string()]);

        let options = ListContainersOptions {
            all: false,
            filters: Some(filters),
            ..Default::default()
        };

        let containers = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(map_docker_err)?;

        let now = Utc::now();
        let mut infos = Vec::with_capacity(containers.len());
        for summary in containers {
            let id = summary.id.clone().unwrap_or_default();
            let inspect = match self
                .docker
                .inspect_container(&id, None::<InspectContainerOptions>)
                .await
            {
                Ok(i) => i,
                Err(DockerError::DockerResponseServerError {
                    status_code: 404, ..
                }) => {
                    warn!("Container {} went away between list and inspect", id);
                    continue;
                }
                Err(e) => return Err(map_docker_err(e)),
            };
            infos.push(container_info(&summary, &inspect, now));
        }
        Ok(infos)
    }

    /// Restart one allow-listed service by its exact container name, capturing
    /// the daemon-reported status before and right after the restart call.
    pub async fn restart(&self, service: ServiceName) -> Result<RestartResult, ApiError> {
        let name = service.as_str();

        let before = self
            .docker
            .inspect_container(name, None::<InspectContainerOptions>)
            .await
            .map_err(map_docker_err)?;
        let previous_status = inspect_status(&before);

        self.docker
            .restart_container(name, None::<RestartContainerOptions>)
            .await
            .map_err(map_docker_err)?;
        info!("Restarted container {}", name);

        // Best-effort re-read; the daemon may still report a transitional state.
        let after = self
            .docker
            .inspect_container(name, None::<InspectContainerOptions>)
            .await
            .map_err(map_docker_err)?;

        Ok(RestartResult {
            service: name.to_string(),
            previous_status,
            current_status: inspect_status(&after),
        })
    }
}

fn map_docker_err(e: DockerError) -> ApiError {
    match e {
        DockerError::DockerResponseServerError {
            status_code: 404, ..
        } => ApiError::ServiceNotFound,
        DockerError::DockerResponseServerError { message, .. } => {
            ApiError::RuntimeOperation(message)
        }
        _ => ApiError::RuntimeUnavailable,
    }
}

fn inspect_status(inspect: &ContainerInspectResponse) -> String {
    inspect
        .state
        .as_ref()
        .and_then(|s| s.status)
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Merge a list entry and its inspect response into a `ContainerInfo`.
/// Exposed for unit tests.
pub(crate) fn container_info(
    summary: &ContainerSummary,
    inspect: &ContainerInspectResponse,
    now: DateTime<Utc>,
) -> ContainerInfo {
    let id: String = summary
        .id
        .as_deref()
        .unwrap_or_default()
        .chars()
        .take(12)
        .collect();

    let name = inspect
        .name
        .clone()
        .or_else(|| summary.names.as_ref().and_then(|n| n.first().cloned()))
        .unwrap_or_default()
        .trim_start_matches('/')
        .to_string();

    let image = summary
        .image
        .clone()
        .filter(|i| !i.is_empty() && !i.starts_with("sha256:"))
        .unwrap_or_else(|| "N/A".to_string());

    let uptime = inspect
        .state
        .as_ref()
        .and_then(|s| s.started_at.as_deref())
        .and_then(|started_at| uptime_since(started_at, now));

    ContainerInfo {
        id,
        name,
        image,
        status: inspect_status(inspect),
        uptime,
    }
}

/// Relative uptime from a daemon-reported RFC 3339 start timestamp. None for
/// missing, unparsable, zero-value ("0001-01-01...") or future timestamps.
fn uptime_since(started_at: &str, now: DateTime<Utc>) -> Option<String> {
    let started = DateTime::parse_from_rfc3339(started_at)
        .ok()?
        .with_timezone(&Utc);
    if started.timestamp() <= 0 {
        return None;
    }
    let elapsed = (now - started).num_seconds();
    if elapsed < 0 {
        return None;
    }
    Some(humanize_distance(elapsed))
}

/// Coarse relative-distance wording, close to arrow's humanize(only_distance).
fn humanize_distance(secs: i64) -> String {
    let minutes = secs / 60;
    let hours = secs / 3600;
    let days = secs / 86_400;
    match secs {
        s if s < 45 => "seconds ago".to_string(),
        s if s < 90 => "a minute ago".to_string(),
        _ if minutes < 45 => format!("{} minutes ago", minutes),
        _ if minutes < 90 => "about an hour ago".to_string(),
        _ if hours < 22 => format!("{} hours ago", hours),
        _ if hours < 36 => "a day ago".to_string(),
        _ if days < 30 => format!("{} days ago", days),
        _ if days < 45 => "a month ago".to_string(),
        _ if days < 365 => format!("{} months ago", days / 30),
        _ if days < 548 => "a year ago".to_string(),
        _ => format!("{} years ago", days / 365),
    }
}
