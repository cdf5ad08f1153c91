//! Scroll cursor
//!
//! A [`ScrollCursor`] pairs the fixed parameters of one scroll
//! ([`ScrollConfig`]) with the state that every advance replaces
//! ([`ScrollState`]).

use super::request::{advance_url, Expiry};
use crate::decode::{decode_json, Hit, ScrollResponse, ShardStats};
use crate::error::{Error, Result};
use crate::http::{Transport, TransportRequest};
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Lazy sequence of pages produced by [`ScrollCursor::into_pages`]
pub type PageStream = Pin<Box<dyn Stream<Item = Result<Vec<Hit>>> + Send>>;

/// Lazy sequence of hits produced by [`ScrollCursor::into_hits`]
pub type HitStream = Pin<Box<dyn Stream<Item = Result<Hit>> + Send>>;

/// Parameters fixed when the scroll is opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollConfig {
    /// Engine base address
    pub base_url: Url,
    pub index: String,
    pub doc_type: String,
    pub expiry: Expiry,
    /// Per-request timeout; `None` uses the transport's default
    pub timeout: Option<Duration>,
}

/// State replaced by every successful advance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollState {
    /// Most recent scroll id; may change on every advance
    pub scroll_id: String,
    /// Most recent page
    pub hits: Vec<Hit>,
    pub took: u64,
    pub timed_out: bool,
    pub shards: ShardStats,
    /// Matching documents, as reported when the scroll was opened
    pub total: u64,
    /// Successful advances so far
    pub advances: u64,
}

impl ScrollState {
    pub(crate) fn opened(response: ScrollResponse) -> Result<Self> {
        let total = response.hits.total.value();
        let mut state = Self {
            total,
            ..Self::default()
        };
        state.apply(response)?;
        Ok(state)
    }

    /// Overwrite the per-page fields with a freshly decoded response
    fn apply(&mut self, response: ScrollResponse) -> Result<()> {
        if response.scroll_id.is_empty() {
            return Err(Error::decode("response carried an empty _scroll_id"));
        }
        self.scroll_id = response.scroll_id;
        self.hits = response.hits.hits;
        self.took = response.took;
        self.timed_out = response.timed_out;
        self.shards = response.shards;
        Ok(())
    }

    /// Copy of the fields an advance does not replace
    fn clone_meta(&self) -> Self {
        Self {
            total: self.total,
            advances: self.advances,
            ..Self::default()
        }
    }
}

/// An open scroll.
///
/// Advancing takes `&mut self`, so one cursor is only ever advanced by one
/// caller at a time. To scan in parallel, open independent cursors.
pub struct ScrollCursor {
    config: ScrollConfig,
    state: ScrollState,
    transport: Arc<dyn Transport>,
    current_page_seen: bool,
}

impl ScrollCursor {
    pub(crate) fn new(
        config: ScrollConfig,
        state: ScrollState,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            state,
            transport,
            current_page_seen: false,
        }
    }

    /// Fetch the next page, replacing the current scroll id and hits.
    ///
    /// On error the cursor keeps its previous state, but the scroll should
    /// be treated as finished. A context that already expired on the engine
    /// fails here like any other rejected request: with a transport error,
    /// usually `HTTP 404`.
    pub async fn advance(&mut self) -> Result<()> {
        let url = advance_url(
            &self.config.base_url,
            self.config.expiry,
            &self.state.scroll_id,
        )?;
        let mut request = TransportRequest::get(url);
        if let Some(timeout) = self.config.timeout {
            request = request.with_timeout(timeout);
        }

        let body = self.transport.send(request).await?;
        let response: ScrollResponse = decode_json(&body)?;

        let mut next = self.state.clone_meta();
        next.apply(response)?;
        next.advances += 1;
        self.state = next;
        self.current_page_seen = true;

        debug!(
            index = %self.config.index,
            page_size = self.state.hits.len(),
            advances = self.state.advances,
            "Scroll advanced"
        );
        if self.state.hits.is_empty() {
            info!(
                index = %self.config.index,
                total = self.state.total,
                advances = self.state.advances,
                "Scroll exhausted"
            );
        }
        Ok(())
    }

    /// Produce the next non-empty page, or `None` once the scroll is exhausted.
    ///
    /// The page returned by the open call comes first (when it has hits).
    /// A page already fetched by [`advance`](Self::advance) counts as
    /// delivered and is not returned again. After the first empty page every
    /// further call returns `None` without touching the network.
    pub async fn next_page(&mut self) -> Result<Option<&[Hit]>> {
        if self.is_exhausted() {
            return Ok(None);
        }
        if !self.current_page_seen {
            self.current_page_seen = true;
            if !self.state.hits.is_empty() {
                return Ok(Some(self.state.hits.as_slice()));
            }
        }

        self.advance().await?;
        if self.state.hits.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.state.hits.as_slice()))
        }
    }

    /// Turn the cursor into a lazy stream of pages.
    ///
    /// The stream ends after the first empty page, or right after yielding
    /// an error.
    pub fn into_pages(self) -> PageStream {
        stream::try_unfold(self, |mut cursor| async move {
            let page = cursor.next_page().await?.map(<[Hit]>::to_vec);
            Ok(page.map(|hits| (hits, cursor)))
        })
        .boxed()
    }

    /// Turn the cursor into a lazy stream of individual hits
    pub fn into_hits(self) -> HitStream {
        self.into_pages()
            .map_ok(|hits| stream::iter(hits.into_iter().map(Ok::<Hit, Error>)))
            .try_flatten()
            .boxed()
    }

    /// True once an advance has returned an empty page
    pub fn is_exhausted(&self) -> bool {
        self.state.advances > 0 && self.state.hits.is_empty()
    }

    pub fn scroll_id(&self) -> &str {
        &self.state.scroll_id
    }

    /// Current page
    pub fn hits(&self) -> &[Hit] {
        &self.state.hits
    }

    /// Total matching documents reported at open time
    pub fn total(&self) -> u64 {
        self.state.total
    }

    pub fn took(&self) -> u64 {
        self.state.took
    }

    pub fn timed_out(&self) -> bool {
        self.state.timed_out
    }

    pub fn shards(&self) -> ShardStats {
        self.state.shards
    }

    pub fn advances(&self) -> u64 {
        self.state.advances
    }

    pub fn expiry(&self) -> Expiry {
        self.config.expiry
    }

    pub fn index(&self) -> &str {
        &self.config.index
    }

    pub fn doc_type(&self) -> &str {
        &self.config.doc_type
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }
}

impl std::fmt::Debug for ScrollCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollCursor")
            .field("config", &self.config)
            .field("scroll_id", &self.state.scroll_id)
            .field("page_size", &self.state.hits.len())
            .field("advances", &self.state.advances)
            .finish_non_exhaustive()
    }
}
