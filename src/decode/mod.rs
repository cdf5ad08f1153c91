//! Response decoder module
//!
//! Turns raw response bytes into typed values. A body that does not match
//! the expected shape is a decode error, never a transport error.
//!
//! # Overview
//!
//! [`decode_json`] is the single entry point; [`types`] holds the wire shapes
//! of scroll responses.

mod types;

pub use types::{Hit, HitsEnvelope, ScrollResponse, ShardStats, TotalHits};

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;

/// Decode a JSON body into `T`
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        Error::decode(format!(
            "expected {}: {e}",
            short_type_name(std::any::type_name::<T>())
        ))
    })
}

/// Stateless JSON decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode a JSON body into `T`
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T> {
        decode_json(body)
    }
}

/// `es_scroll::decode::types::ScrollResponse` -> `ScrollResponse`
fn short_type_name(full: &str) -> &str {
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}
