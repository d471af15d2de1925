// Host status aggregation over node-exporter metrics

use crate::error::ApiError;
use crate::metrics_repo::MetricsRepo;
use crate::models::{CpuStatus, DiskStatus, MemoryStatus, NodeStatus, ProcessStatus};

const LOAD1: &str = "node_load1";
const CPU_BUSY_PERCENT: &str =
    r#"100 * (1 - avg by (instance)(rate(node_cpu_seconds_total{mode="idle"}[5m])))"#;
const CPU_TEMPERATURE: &str =
    r#"avg_over_time(node_hwmon_temp_celsius{chip="platform_coretemp_0"}[5m])"#;
const PROCS_RUNNING: &str = "node_procs_running";
// Root filesystem only; tmpfs/overlay mounts would shadow the real disk.
const DISK_TOTAL: &str = r#"node_filesystem_size_bytes{mountpoint="/",fstype!~"tmpfs|overlay"}"#;
const DISK_AVAILABLE: &str =
    r#"node_filesystem_avail_bytes{mountpoint="/",fstype!~"tmpfs|overlay"}"#;

/// Assembles one `NodeStatus` snapshot from a fixed battery of instant queries.
pub struct StatusAggregator {
    metrics: MetricsRepo,
    instance: String,
}

impl StatusAggregator {
    pub fn new(metrics: MetricsRepo, instance: impl Into<String>) -> Self {
        Self {
            metrics,
            instance: instance.into(),
        }
    }

    /// Any backend failure aborts the whole snapshot; absent samples within a
    /// successful snapshot are expected and stay `None`.
    pub async fn snapshot(&self) -> Result<NodeStatus, ApiError> {
        let load1 = self.metrics.query(LOAD1).await?;
        let usage_percent = self.metrics.query(CPU_BUSY_PERCENT).await?;
        let temperature_celsius = self.metrics.query(CPU_TEMPERATURE).await?;

        let running = self.metrics.query(PROCS_RUNNING).await?;

        let mem_total = self
            .metrics
            .query(&format!(
                r#"node_memory_MemTotal_bytes{{instance="{}"}}"#,
                self.instance
            ))
            .await?;
        let mem_available = self
            .metrics
            .query(&format!(
                r#"node_memory_MemAvailable_bytes{{instance="{}"}}"#,
                self.instance
            ))
            .await?;

        let disk_total = self.metrics.query(DISK_TOTAL).await?;
        let disk_available = self.metrics.query(DISK_AVAILABLE).await?;

        Ok(NodeStatus {
            cpu: CpuStatus {
                load1,
                usage_percent,
                temperature_celsius,
            },
            processes: ProcessStatus { running },
            memory: MemoryStatus {
                total_bytes: mem_total,
                available_bytes: mem_available,
                used_percent: used_percent(mem_total, mem_available),
            },
            disk: DiskStatus {
                root_total_bytes: disk_total,
                root_available_bytes: disk_available,
                root_used_percent: used_percent(disk_total, disk_available),
            },
        })
    }
}

/// Derived used-percentage. Absent when either side is missing, the total is
/// zero, or the inputs are not finite; NaN/Infinity must never reach the wire.
pub fn used_percent(total: Option<f64>, available: Option<f64>) -> Option<f64> {
    match (total, available) {
        (Some(total), Some(available))
            if total != 0.0 && total.is_finite() && available.is_finite() =>
        {
            Some(100.0 * (1.0 - available / total))
        }
        _ => None,
    }
}
