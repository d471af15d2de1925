// Domain models (wire format matches the original homelab API)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of services the operator may restart. The allow-list is the enum
/// itself; anything else is rejected at the request boundary before any Docker call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceName {
    Grafana,
    N8n,
    Pihole,
    Homeassistant,
}

impl ServiceName {
    /// Container name as known to the Docker daemon.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceName::Grafana => "grafana",
            ServiceName::N8n => "n8n",
            ServiceName::Pihole => "pihole",
            ServiceName::Homeassistant => "homeassistant",
        }
    }
}

impl FromStr for ServiceName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grafana" => Ok(ServiceName::Grafana),
            "n8n" => Ok(ServiceName::N8n),
            "pihole" => Ok(ServiceName::Pihole),
            "homeassistant" => Ok(ServiceName::Homeassistant),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One running container, normalized for the control panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerInfo {
    /// First 12 characters of the daemon-assigned id (shorter ids are not padded).
    pub id: String,
    pub name: String,
    /// Image reference, or "N/A" when the container runs an untagged image.
    pub image: String,
    pub status: String,
    /// Human-relative time since start; absent when the start timestamp is
    /// missing or unparsable.
    pub uptime: Option<String>,
}

/// Outcome of a restart call. `current_status` is read right after the restart
/// returns and may still show a transitional state such as "restarting".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestartResult {
    pub service: String,
    pub previous_status: String,
    pub current_status: String,
}

// Host status snapshot. Every leaf is optional: a metric with no series behind
// it serializes as null, which is distinct from a measured zero.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuStatus {
    pub load1: Option<f64>,
    pub usage_percent: Option<f64>,
    pub temperature_celsius: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessStatus {
    pub running: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStatus {
    pub total_bytes: Option<f64>,
    pub available_bytes: Option<f64>,
    pub used_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskStatus {
    pub root_total_bytes: Option<f64>,
    pub root_available_bytes: Option<f64>,
    pub root_used_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStatus {
    pub cpu: CpuStatus,
    pub processes: ProcessStatus,
    pub memory: MemoryStatus,
    pub disk: DiskStatus,
}
