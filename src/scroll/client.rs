//! Search client: opens scrolls

use super::cursor::{PageStream, ScrollConfig, ScrollCursor, ScrollState};
use super::request::{open_url, ScrollRequest};
use crate::config::ClientConfig;
use crate::decode::{decode_json, ScrollResponse};
use crate::error::Result;
use crate::http::{HttpClient, Transport, TransportRequest};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Entry point for scan-and-scroll retrieval.
///
/// Cheap to clone; clones share one transport.
#[derive(Clone)]
pub struct SearchClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl SearchClient {
    /// Create a client backed by [`HttpClient`]
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpClient::new(config)?;
        let base_url = http.config().base()?;
        Ok(Self {
            base_url,
            transport: Arc::new(http),
        })
    }

    /// Create a client over any transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            base_url: config.base()?,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Open a scroll and fetch its first page.
    ///
    /// Preconditions are checked before any request is made; a violation is
    /// a validation error. Transport and decode failures are returned as they
    /// are, with no retry.
    pub async fn open_scroll(&self, request: ScrollRequest) -> Result<ScrollCursor> {
        let expiry = request.validate()?;
        let ScrollRequest {
            index,
            doc_type,
            body,
            timeout,
            ..
        } = request;

        let url = open_url(&self.base_url, &index, &doc_type, expiry)?;
        let mut http_request = TransportRequest::post(url, body);
        if let Some(timeout) = timeout {
            http_request = http_request.with_timeout(timeout);
        }

        let response_body = self.transport.send(http_request).await?;
        let response: ScrollResponse = decode_json(&response_body)?;
        let state = ScrollState::opened(response)?;

        debug!(
            index = %index,
            doc_type = %doc_type,
            expiry = %expiry,
            total = state.total,
            page_size = state.hits.len(),
            "Scroll opened"
        );

        let config = ScrollConfig {
            base_url: self.base_url.clone(),
            index,
            doc_type,
            expiry,
            timeout,
        };
        Ok(ScrollCursor::new(config, state, Arc::clone(&self.transport)))
    }

    /// Open a scroll from its four parts
    pub async fn scan_and_scroll(
        &self,
        index: &str,
        doc_type: &str,
        expiry: Duration,
        body: &str,
    ) -> Result<ScrollCursor> {
        self.open_scroll(ScrollRequest::new(index, doc_type, expiry, body))
            .await
    }

    /// Open a scroll and stream its pages
    pub async fn scroll_pages(&self, request: ScrollRequest) -> Result<PageStream> {
        Ok(self.open_scroll(request).await?.into_pages())
    }
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
