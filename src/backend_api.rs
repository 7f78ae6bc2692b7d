use std::path::Path;
use std::time::Duration;

use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{
    api_base_url, API_VERSION, CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS, UPLOAD_TIMEOUT_SECS,
};
use crate::types::{AnalyticsSummary, TradesResponse};

// ── Error types ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    /// Network failure: connect, timeout, or the body could not be read/parsed.
    Transport(String),
    /// The backend answered with a non-2xx status. The response body is
    /// logged at the client layer, never carried upward.
    Backend { status: u16, message: String },
}

impl ApiError {
    /// The failure's own message, without the classification prefix.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Transport(msg) => msg,
            ApiError::Backend { message, .. } => message,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {}", msg),
            ApiError::Backend { status, message } => {
                write!(f, "backend error (HTTP {}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

// ── Client ────────────────────────────────────────────────────────────────────

/// HTTP client for the trading bot's analytics REST API.
///
/// Owns the pooled connection and the resolved base URL; one method per
/// endpoint. All failures are normalized into [`ApiError`].
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Client against the configured base URL (env override or local default).
    pub fn new() -> Self {
        Self::with_base_url(api_base_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .expect("HTTP client build failed");

        BackendClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}/analytics/{}", self.base_url, API_VERSION, path)
    }

    /// GET the precomputed analytics summary. No request parameters.
    pub async fn fetch_summary(&self) -> Result<AnalyticsSummary, ApiError> {
        let url = self.endpoint("summary");
        log::info!("Fetching analytics summary from {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("HTTP error: {}", e)))?;
        Self::decode(resp).await
    }

    /// GET the trade list matching `filters`. The pairs are forwarded as
    /// query parameters unchanged; the backend is the sole validator.
    pub async fn fetch_filtered_trades(
        &self,
        filters: &[(String, String)],
    ) -> Result<TradesResponse, ApiError> {
        let url = self.endpoint("filter");
        log::info!("Fetching trades from {} with {} filter(s)", url, filters.len());

        let resp = self
            .client
            .get(&url)
            .query(filters)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("HTTP error: {}", e)))?;
        Self::decode(resp).await
    }

    /// POST a trades file as multipart form data (field `file`). The response
    /// body is returned as raw JSON; this layer does not interpret it.
    pub async fn upload_trades(&self, path: &Path) -> Result<Value, ApiError> {
        let url = self.endpoint("upload-trades");
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("trades")
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Transport(format!("read {}: {}", path.display(), e)))?;
        log::info!("Uploading {} ({} bytes) to {}", file_name, bytes.len(), url);

        let form = multipart::Form::new().part("file", multipart::Part::bytes(bytes).file_name(file_name));

        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("HTTP error: {}", e)))?;
        Self::decode(resp).await
    }

    /// Shared status check + JSON decode. Non-2xx bodies are logged here for
    /// diagnostics and reduced to a human-readable message.
    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("body read error: {}", e)))?;

        if status.is_success() {
            serde_json::from_str::<T>(&text)
                .map_err(|e| ApiError::Transport(format!("Parse error: {}", e)))
        } else {
            log::error!("Backend returned HTTP {} — body: {}", status.as_u16(), text);
            Err(ApiError::Backend {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_human_readable() {
        let transport = ApiError::Transport("connection refused".into());
        assert_eq!(transport.to_string(), "transport error: connection refused");

        let backend = ApiError::Backend { status: 503, message: "Service Unavailable".into() };
        assert_eq!(
            backend.to_string(),
            "backend error (HTTP 503): Service Unavailable"
        );
    }

    #[test]
    fn endpoint_joins_base_version_and_path() {
        let client = BackendClient::with_base_url("http://localhost:8000/");
        assert_eq!(
            client.endpoint("summary"),
            "http://localhost:8000/api/v1/analytics/summary"
        );
        assert_eq!(
            client.endpoint("upload-trades"),
            "http://localhost:8000/api/v1/analytics/upload-trades"
        );
    }
}
