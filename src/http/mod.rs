//! HTTP transport module
//!
//! Every call the crate makes to the engine goes through the [`Transport`]
//! trait: one request in, the raw response body out, or an error when the
//! connection fails or the status falls outside the accepted range.
//!
//! # Features
//!
//! - **Transport trait**: swap the network layer out in tests
//! - **reqwest backend**: [`HttpClient`] with per-request timeouts
//! - **Raw error bodies**: rejected responses keep the engine's error text

mod client;
mod transport;

pub use client::HttpClient;
pub use transport::{is_accepted_status, Transport, TransportRequest};

#[cfg(test)]
mod tests;
