//! HTTP client for the network-status source

use std::time::Duration;

use serde::Deserialize;

/// Client for fetching the current node list from the status endpoint
#[derive(Debug, Clone)]
pub struct StatusClient {
    http_client: reqwest::Client,
    status_url: String,
}

/// Wire shape of the status endpoint response
#[derive(Debug, Deserialize)]
struct StatusResponse {
    pods: Vec<String>,
}

impl StatusClient {
    /// Create a client with a per-request timeout
    pub fn new(status_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            status_url: status_url.into(),
        }
    }

    /// Fetch the current node identifiers, preserving response order
    pub async fn fetch_nodes(&self) -> Result<Vec<String>, FetchError> {
        let response = self
            .http_client
            .get(&self.status_url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Deserialization(e.to_string()))?;

        Ok(body.pods)
    }
}

/// Single-attempt fetch errors; recovered by retry within the sampler
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Status source returned HTTP {0}")]
    Status(u16),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}
