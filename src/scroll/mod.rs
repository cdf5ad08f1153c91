//! Scan-and-scroll retrieval
//!
//! Opening a scroll posts the query once and leaves a cursor open on the
//! engine; each advance fetches the next page with the most recent scroll
//! id. The first empty page means the result set is exhausted.
//!
//! # Overview
//!
//! ```text
//! SearchClient::open_scroll ──POST {index}/{type}/_search?search_type=scan&scroll=60s──▶ ScrollCursor
//! ScrollCursor::advance     ──GET  _search/scroll?scroll=60s&scroll_id=..─────────────▶ next page
//! ```
//!
//! Iteration is forward-only. There is no close call: a cursor that is
//! dropped early simply expires on the engine once its expiry lapses.

mod client;
mod cursor;
mod request;

pub use client::SearchClient;
pub use cursor::{HitStream, PageStream, ScrollConfig, ScrollCursor, ScrollState};
pub use request::{Expiry, ScrollRequest};
