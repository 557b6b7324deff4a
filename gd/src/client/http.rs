//! HTTP implementation of the analysis client
//!
//! Talks to the backend's JSON API: `POST /api/analyze` plus the auxiliary
//! `GET /api/health` and `GET /api/stats`. All three share one failure
//! classification.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{AnalysisClient, AnalysisError};
use crate::config::ApiConfig;
use crate::domain::{AnalysisRequest, AnalysisResult};

/// Backend analysis client
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    base_url: String,
    http: Client,
    timeout: Duration,
}

impl HttpAnalysisClient {
    /// Create a client from API configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, AnalysisError> {
        debug!(?config, "from_config: called");
        Self::new(&config.base_url, Duration::from_millis(config.timeout_ms))
    }

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AnalysisError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::unknown(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check backend health
    pub async fn health(&self) -> Result<serde_json::Value, AnalysisError> {
        debug!("health: called");
        self.execute(self.http.get(self.url("/api/health"))).await
    }

    /// Fetch backend usage statistics
    pub async fn stats(&self) -> Result<serde_json::Value, AnalysisError> {
        debug!("stats: called");
        self.execute(self.http.get(self.url("/api/stats"))).await
    }

    /// Send a request and classify the outcome
    ///
    /// Precedence: a failure status wins over everything else; then transport
    /// failures with no response; then anything else (including bodies that
    /// do not parse).
    async fn execute<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Result<T, AnalysisError> {
        let response = match builder.send().await {
            Ok(r) => r,
            Err(e) => {
                let err = AnalysisError::from_transport(&e);
                warn!(error = %e, kind = ?err.kind(), "execute: request failed");
                return Err(err);
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if !status.is_success() => {
                debug!(error = %e, "execute: failed to read error body");
                String::new()
            }
            Err(e) => {
                let err = AnalysisError::from_transport(&e);
                warn!(error = %e, kind = ?err.kind(), "execute: failed to read response body");
                return Err(err);
            }
        };

        if !status.is_success() {
            let err = AnalysisError::from_response(status.as_u16(), &body);
            warn!(%status, message = %err, "execute: backend returned an error");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "execute: malformed response body");
            AnalysisError::unknown(format!("Invalid response from server: {}", e))
        })
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        debug!(destination = %request.destination, concern = %request.concern.as_str(), "submit: called");
        // .json() sets Content-Type: application/json
        let builder = self.http.post(self.url("/api/analyze")).json(request);
        self.execute(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = HttpAnalysisClient::new("http://localhost:8000/", Duration::from_secs(30)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/api/analyze"), "http://localhost:8000/api/analyze");
    }

    #[test]
    fn test_from_config_uses_timeout() {
        let config = ApiConfig {
            base_url: "http://example.test".to_string(),
            timeout_ms: 1500,
        };
        let client = HttpAnalysisClient::from_config(&config).unwrap();
        assert_eq!(client.timeout(), Duration::from_millis(1500));
    }
}
