//! Transport trait and request type

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use std::time::Duration;
use url::Url;

/// A single request handed to a [`Transport`]
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Fully built URL, query string included
    pub url: Url,
    /// Request body, sent verbatim
    pub body: Option<String>,
    /// Override the transport's default timeout for this request
    pub timeout: Option<Duration>,
}

impl TransportRequest {
    /// Create a request
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
            timeout: None,
        }
    }

    /// Create a GET request
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a POST request carrying `body`
    pub fn post(url: Url, body: impl Into<String>) -> Self {
        Self::new(Method::POST, url).body(body)
    }

    /// Set the body
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Sends one request and returns the raw response body.
///
/// Implementations must fail with a transport error (see
/// [`ErrorKind::Transport`](crate::error::ErrorKind)) on connection problems
/// and on any status for which [`is_accepted_status`] is false, carrying the
/// response text when there is one. They hold no per-call mutable state, so a
/// single transport can be shared by any number of cursors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<Bytes>;
}

/// Statuses whose body is handed to the decoder: `200 OK` and `201 Created`.
///
/// Every other status, including the rest of the 2xx range, is a transport
/// failure.
pub fn is_accepted_status(status: u16) -> bool {
    status == 200 || status == 201
}
