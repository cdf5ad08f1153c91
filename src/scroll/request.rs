//! Scroll parameters, validation and URL construction

use crate::error::{Error, Result};
use std::fmt;
use std::time::Duration;
use url::Url;

/// How long the engine keeps a scroll context alive between advances.
///
/// Every advance re-sends the expiry, which restarts the countdown on the
/// engine. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry(Duration);

impl Expiry {
    /// Wrap a duration, rejecting zero
    pub fn new(duration: Duration) -> Result<Self> {
        if duration.is_zero() {
            return Err(Error::validation("expiry", "must be greater than zero"));
        }
        Ok(Self(duration))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    /// Whole seconds sent on the wire, rounded up
    pub fn seconds(&self) -> u64 {
        let secs = self.0.as_secs();
        if self.0.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds())
    }
}

/// Everything needed to open a scroll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Index (collection) to scan
    pub index: String,
    /// Document type within the index
    pub doc_type: String,
    /// Scroll context expiry
    pub expiry: Duration,
    /// Query document, sent verbatim
    pub body: String,
    /// Per-request timeout for this scroll, overriding the client's
    pub timeout: Option<Duration>,
}

impl ScrollRequest {
    pub fn new(
        index: impl Into<String>,
        doc_type: impl Into<String>,
        expiry: Duration,
        body: impl Into<String>,
    ) -> Self {
        Self {
            index: index.into(),
            doc_type: doc_type.into(),
            expiry,
            body: body.into(),
            timeout: None,
        }
    }

    /// Set the per-request timeout for the open call and every advance
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check the preconditions of an open call
    pub fn validate(&self) -> Result<Expiry> {
        if self.index.is_empty() {
            return Err(Error::validation("index", "must not be empty"));
        }
        if self.doc_type.is_empty() {
            return Err(Error::validation("doc_type", "must not be empty"));
        }
        let expiry = Expiry::new(self.expiry)?;
        if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(Error::validation("timeout", "must be greater than zero"));
        }
        Ok(expiry)
    }
}

/// `{base}/{index}/{doc_type}/_search?search_type=scan&scroll={expiry}`
pub(crate) fn open_url(base: &Url, index: &str, doc_type: &str, expiry: Expiry) -> Result<Url> {
    let mut url = join_segments(base, &[index, doc_type, "_search"])?;
    url.query_pairs_mut()
        .append_pair("search_type", "scan")
        .append_pair("scroll", &expiry.to_string());
    Ok(url)
}

/// `{base}/_search/scroll?scroll={expiry}&scroll_id={scroll_id}`
pub(crate) fn advance_url(base: &Url, expiry: Expiry, scroll_id: &str) -> Result<Url> {
    let mut url = join_segments(base, &["_search", "scroll"])?;
    url.query_pairs_mut()
        .append_pair("scroll", &expiry.to_string())
        .append_pair("scroll_id", scroll_id);
    Ok(url)
}

fn join_segments(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| Error::config(format!("'{base}' cannot be used as a base address")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
