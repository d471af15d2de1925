// Prometheus instant queries via reqwest

use crate::error::ApiError;
use serde::Deserialize;
use std::time::Duration;

const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Thin client for the Prometheus HTTP query API. Read-only and stateless;
/// safe to clone and call concurrently.
#[derive(Clone)]
pub struct MetricsRepo {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    status: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    data: Option<QueryData>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryData {
    #[serde(default)]
    result: Vec<QuerySample>,
}

#[derive(Debug, Deserialize)]
struct QuerySample {
    // Prometheus encodes an instant value as [<unix ts>, "<string value>"].
    value: (f64, String),
}

impl MetricsRepo {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(QUERY_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Evaluate one instant query and return its scalar value, or None when no
    /// series matched. One attempt, no retries; transport and backend errors
    /// surface as 502-mapped `ApiError` variants.
    pub async fn query(&self, promql: &str) -> Result<Option<f64>, ApiError> {
        let url = format!("{}/api/v1/query", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("query", promql)])
            .send()
            .await
            .map_err(|e| ApiError::MetricsUnreachable(e.to_string()))?
            .error_for_status()
            .map_err(|e| ApiError::MetricsUnreachable(e.to_string()))?;

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| ApiError::MetricsUnreachable(e.to_string()))?;
        extract_sample(body)
    }
}

fn extract_sample(body: QueryResponse) -> Result<Option<f64>, ApiError> {
    if body.status != "success" {
        return Err(ApiError::MetricsQuery(
            body.error.unwrap_or_else(|| "unknown".into()),
        ));
    }
    let result = body.data.unwrap_or_default().result;
    match result.first() {
        // Malformed sample values degrade to "no data", never to a failed request.
        Some(sample) => Ok(sample.value.1.parse::<f64>().ok()),
        None => Ok(None),
    }
}
