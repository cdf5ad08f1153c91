//! reqwest-backed transport
//!
//! Sends exactly one request per call:
//! - No retries; a failed call is reported to the caller as-is
//! - Per-request timeout, falling back to the configured default
//! - Rejected statuses keep the raw response text

use super::transport::{is_accepted_status, Transport, TransportRequest};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client speaking to the search engine
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client from a configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether requests with this method carry the configured content type
    fn sends_content_type(method: &Method) -> bool {
        *method == Method::POST || *method == Method::PUT
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: TransportRequest) -> Result<Bytes> {
        let timeout = request.timeout.unwrap_or_else(|| self.config.timeout());
        let TransportRequest {
            method, url, body, ..
        } = request;

        let mut req = self.client.request(method.clone(), url.clone());

        for (key, value) in &self.config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if Self::sends_content_type(&method) {
            req = req.header(CONTENT_TYPE, self.config.content_type.as_str());
        }

        if let Some(body) = body {
            req = req.body(body);
        }

        req = req.timeout(timeout);

        let response = req.send().await.map_err(|e| timeout_or_http(e, timeout))?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| timeout_or_http(e, timeout))?;

        if !is_accepted_status(status) {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            warn!("Request rejected with {}: {} {}", status, method, url);
            return Err(Error::http_status(status, body));
        }

        debug!("Request succeeded ({}): {} {}", status, method, url);
        Ok(bytes)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn timeout_or_http(e: reqwest::Error, timeout: Duration) -> Error {
    if e.is_timeout() {
        Error::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        Error::Http(e)
    }
}
