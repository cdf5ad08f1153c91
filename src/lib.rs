// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # es-scroll
//!
//! A typed Elasticsearch client for retrieving large result sets with the
//! scan-and-scroll API, without paying for deep pagination.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use es_scroll::{ClientConfig, Result, SearchClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = SearchClient::new(ClientConfig::from_url("http://localhost:9200")?)?;
//!
//!     let mut cursor = client
//!         .scan_and_scroll(
//!             "orders",
//!             "all",
//!             Duration::from_secs(60),
//!             r#"{"query":{"match_all":{}},"size":100}"#,
//!         )
//!         .await?;
//!
//!     println!("{} matching documents", cursor.total());
//!     while let Some(hits) = cursor.next_page().await? {
//!         for hit in hits {
//!             println!("{}", hit.id);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  SearchClient::open_scroll ──▶ ScrollCursor                   │
//! │      advance() / next_page() / into_pages() / into_hits()     │
//! └──────────────────────────────────────────────────────────────┘
//!                 │                              │
//! ┌───────────────┴──────────────┐ ┌────────────┴─────────────────┐
//! │  http: Transport / HttpClient│ │  decode: ScrollResponse, Hit  │
//! └──────────────────────────────┘ └──────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document the remaining accessors and wire fields before 1.0

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Client configuration
pub mod config;

/// HTTP transport
pub mod http;

/// Response decoding and wire types
pub mod decode;

/// Scan-and-scroll cursors
pub mod scroll;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ClientConfig;
pub use decode::{Hit, ScrollResponse};
pub use error::{Error, ErrorKind, Result};
pub use scroll::{Expiry, ScrollCursor, ScrollRequest, SearchClient};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
