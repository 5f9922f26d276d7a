//! Dashboard API client
//!
//! Fetches the full dashboard payload in one request. A response either
//! decodes completely or the call fails; there are no partial payloads.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::types::{CarbontrackError, DashboardPayload, Result};

/// Default dashboard API base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8001/api";

/// HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiHealth {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

pub struct DashboardClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl DashboardClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CarbontrackError::Fetch(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/dashboard`
    pub fn fetch_dashboard(&self) -> Result<DashboardPayload> {
        let payload: DashboardPayload = self.get_json("/dashboard")?;
        info!(
            transactions = payload.transactions.len(),
            goals = payload.goals.len(),
            achievements = payload.achievements.len(),
            "fetched dashboard"
        );
        Ok(payload)
    }

    /// `GET {base}/health`
    pub fn health(&self) -> Result<ApiHealth> {
        self.get_json("/health")
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .send()
            .map_err(|e| CarbontrackError::Fetch(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CarbontrackError::Fetch(format!(
                "API Error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )));
        }

        response
            .json()
            .map_err(|e| CarbontrackError::Fetch(format!("JSON parse error: {}", e)))
    }
}
